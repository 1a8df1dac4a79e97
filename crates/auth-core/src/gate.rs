//! 访问控制门禁
//!
//! 所有检查都是对 (当前 Actor, 权限表, 输入) 的纯函数：
//! 无 Actor、角色未映射、权限不在集合中都只得到 `false`，从不报错。

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::actor::Actor;
use crate::permission::Permission;
use crate::role::Role;
use crate::session::ActorSource;
use crate::table::RoleTable;

/// 访问要求：单个权限或单个角色，二者互斥
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Requirement {
    Permission(Permission),
    Role(Role),
}

impl Requirement {
    pub const fn kind(&self) -> &'static str {
        match self {
            Requirement::Permission(_) => "permission",
            Requirement::Role(_) => "role",
        }
    }
}

impl From<Permission> for Requirement {
    fn from(permission: Permission) -> Self {
        Requirement::Permission(permission)
    }
}

impl From<Role> for Requirement {
    fn from(role: Role) -> Self {
        Requirement::Role(role)
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requirement::Permission(permission) => write!(f, "permission:{}", permission),
            Requirement::Role(role) => write!(f, "role:{}", role),
        }
    }
}

/// `guard` 的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guarded<T> {
    /// 检查通过
    Content(T),
    /// 检查未通过，使用调用方提供的替代内容
    Fallback(T),
    /// 检查未通过且没有替代内容，渲染默认的拒绝占位
    Denied,
}

impl<T> Guarded<T> {
    pub fn is_granted(&self) -> bool {
        matches!(self, Guarded::Content(_))
    }

    /// 被选中的内容（content 或 fallback）
    pub fn into_option(self) -> Option<T> {
        match self {
            Guarded::Content(value) | Guarded::Fallback(value) => Some(value),
            Guarded::Denied => None,
        }
    }

    /// 默认拒绝占位由调用方给出
    pub fn unwrap_or(self, denied: T) -> T {
        self.into_option().unwrap_or(denied)
    }

    pub fn unwrap_or_else(self, denied: impl FnOnce() -> T) -> T {
        self.into_option().unwrap_or_else(denied)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Guarded<U> {
        match self {
            Guarded::Content(value) => Guarded::Content(f(value)),
            Guarded::Fallback(value) => Guarded::Fallback(f(value)),
            Guarded::Denied => Guarded::Denied,
        }
    }
}

/// 一次性读取 Actor 后的检查视图
///
/// 同一视图上的所有检查都基于同一个 Actor 快照，适合一次完整的渲染 / 路由解析。
#[derive(Debug, Clone)]
pub struct AccessView {
    actor: Option<Arc<Actor>>,
    table: Arc<RoleTable>,
}

impl AccessView {
    pub fn new(actor: Option<Arc<Actor>>, table: Arc<RoleTable>) -> Self {
        Self { actor, table }
    }

    pub fn actor(&self) -> Option<&Actor> {
        self.actor.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.actor.is_some()
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.actor
            .as_ref()
            .is_some_and(|actor| self.table.grants(actor.role, permission))
    }

    /// 精确比较，无角色继承
    pub fn has_role(&self, role: Role) -> bool {
        self.actor.as_ref().is_some_and(|actor| actor.role == role)
    }

    pub fn check(&self, requirement: impl Into<Requirement>) -> bool {
        match requirement.into() {
            Requirement::Permission(permission) => self.has_permission(permission),
            Requirement::Role(role) => self.has_role(role),
        }
    }

    /// 按检查结果选择 `content` 或 `fallback`
    pub fn guard<T>(
        &self,
        requirement: impl Into<Requirement>,
        content: T,
        fallback: Option<T>,
    ) -> Guarded<T> {
        if self.check(requirement) {
            Guarded::Content(content)
        } else {
            match fallback {
                Some(fallback) => Guarded::Fallback(fallback),
                None => Guarded::Denied,
            }
        }
    }

    /// 当前 Actor 拥有的全部权限；匿名或角色未映射时为空
    pub fn granted_permissions(&self) -> Vec<Permission> {
        self.actor
            .as_ref()
            .and_then(|actor| self.table.permissions(actor.role))
            .unwrap_or_default()
    }
}

/// 门禁
///
/// 持有注入的 [`ActorSource`] 和只读权限表。每次检查读取一次当前 Actor。
#[derive(Clone)]
pub struct AccessGate {
    source: Arc<dyn ActorSource>,
    table: Arc<RoleTable>,
}

impl AccessGate {
    pub fn new(source: Arc<dyn ActorSource>, table: Arc<RoleTable>) -> Self {
        Self { source, table }
    }

    /// 使用内置权限表
    pub fn with_builtin_table(source: Arc<dyn ActorSource>) -> Self {
        Self::new(source, Arc::new(RoleTable::builtin()))
    }

    pub fn table(&self) -> &RoleTable {
        &self.table
    }

    pub fn snapshot(&self) -> AccessView {
        AccessView::new(self.source.current_actor(), Arc::clone(&self.table))
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.snapshot().has_permission(permission)
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.snapshot().has_role(role)
    }

    pub fn check(&self, requirement: impl Into<Requirement>) -> bool {
        self.snapshot().check(requirement)
    }

    pub fn guard<T>(
        &self,
        requirement: impl Into<Requirement>,
        content: T,
        fallback: Option<T>,
    ) -> Guarded<T> {
        self.snapshot().guard(requirement, content, fallback)
    }

    pub fn granted_permissions(&self) -> Vec<Permission> {
        self.snapshot().granted_permissions()
    }
}

impl fmt::Debug for AccessGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessGate")
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}
