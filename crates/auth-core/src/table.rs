//! 角色 → 权限映射表

use std::collections::{HashMap, HashSet};

use crate::permission::Permission;
use crate::role::Role;

/// 内置角色的默认权限
///
/// 穷尽匹配：新增角色时编译器会要求在这里给出权限集合。
pub const fn default_permissions(role: Role) -> &'static [Permission] {
    use Permission::*;

    match role {
        Role::Admin => &Permission::ALL,
        Role::Warden => &[
            ViewDashboard,
            ViewAttendance,
            ManageAttendance,
            ViewMeals,
            ManageStudents,
            ViewRooms,
            ManageRooms,
            ManageComplaints,
            ManageVisitors,
            ViewReports,
        ],
        Role::Accountant => &[
            ViewDashboard,
            ViewFinance,
            ManageFinance,
            ViewInvoices,
            ManageInvoices,
            ViewReports,
        ],
        Role::KitchenStaff => &[ViewDashboard, ViewMeals, ManageMeals, ManageInventory],
        Role::Student => &[
            ViewDashboard,
            ViewAttendance,
            ViewMeals,
            ViewInvoices,
            ViewRooms,
            SubmitComplaints,
        ],
    }
}

/// 角色权限表
///
/// 构建后只读。缺失的角色条目视为不授予任何权限。
#[derive(Debug, Clone)]
pub struct RoleTable {
    entries: HashMap<Role, HashSet<Permission>>,
}

impl RoleTable {
    /// 内置表，覆盖全部角色
    pub fn builtin() -> Self {
        Self::from_entries(
            Role::ALL
                .into_iter()
                .map(|role| (role, default_permissions(role).iter().copied())),
        )
    }

    /// 从显式条目构建（可以不覆盖全部角色）
    ///
    /// 同一角色出现多次时权限取并集。
    pub fn from_entries<I, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Role, P)>,
        P: IntoIterator<Item = Permission>,
    {
        let mut map: HashMap<Role, HashSet<Permission>> = HashMap::new();
        for (role, permissions) in entries {
            map.entry(role).or_default().extend(permissions);
        }
        Self { entries: map }
    }

    /// 角色是否被授予权限；未映射的角色返回 false
    pub fn grants(&self, role: Role, permission: Permission) -> bool {
        self.entries
            .get(&role)
            .is_some_and(|permissions| permissions.contains(&permission))
    }

    pub fn contains_role(&self, role: Role) -> bool {
        self.entries.contains_key(&role)
    }

    /// 角色的权限（按声明顺序排序）；未映射时返回 None
    pub fn permissions(&self, role: Role) -> Option<Vec<Permission>> {
        self.entries.get(&role).map(|set| {
            let mut permissions: Vec<Permission> = set.iter().copied().collect();
            permissions.sort();
            permissions
        })
    }

    /// 表中没有条目的角色
    pub fn missing_roles(&self) -> Vec<Role> {
        Role::ALL
            .into_iter()
            .filter(|role| !self.entries.contains_key(role))
            .collect()
    }

    pub fn is_total(&self) -> bool {
        self.missing_roles().is_empty()
    }
}

impl Default for RoleTable {
    fn default() -> Self {
        Self::builtin()
    }
}
