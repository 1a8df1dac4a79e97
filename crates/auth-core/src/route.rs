//! 路由保护
//!
//! 与 `guard` 相同的判定，但失败时给出导航目标：
//! 未登录去登录页，已登录去其角色的落地页。

use crate::gate::{AccessView, Requirement};
use crate::role::Role;

/// 角色登录后（或被拒绝后）的落地页
pub const fn landing_route(role: Role) -> &'static str {
    match role {
        Role::Admin | Role::Warden => "/dashboard",
        Role::Accountant => "/finance",
        Role::KitchenStaff => "/meals",
        Role::Student => "/portal",
    }
}

/// 路由解析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Render,
    Redirect(String),
    /// 已经在落地页上仍被拒绝，渲染默认拒绝页以避免重定向循环
    Denied,
}

/// 路由守卫
#[derive(Debug, Clone)]
pub struct RouteGuard {
    login_route: String,
}

impl RouteGuard {
    pub fn new(login_route: impl Into<String>) -> Self {
        Self {
            login_route: login_route.into(),
        }
    }

    pub fn login_route(&self) -> &str {
        &self.login_route
    }

    pub fn resolve(&self, view: &AccessView, path: &str, requirement: Requirement) -> RouteDecision {
        if view.check(requirement) {
            return RouteDecision::Render;
        }

        match view.actor() {
            None if path == self.login_route => RouteDecision::Denied,
            None => RouteDecision::Redirect(self.login_route.clone()),
            Some(actor) => {
                let landing = landing_route(actor.role);
                if landing == path {
                    RouteDecision::Denied
                } else {
                    RouteDecision::Redirect(landing.to_string())
                }
            }
        }
    }
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::new("/login")
    }
}
