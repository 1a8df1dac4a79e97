//! hostel-auth-core - 访问控制核心库
//!
//! 角色 / 权限标签、角色权限表、会话存储、门禁、路由保护与导航菜单。

pub mod actor;
pub mod error;
pub mod gate;
pub mod navigation;
pub mod permission;
pub mod role;
pub mod route;
pub mod session;
pub mod table;

pub use actor::Actor;
pub use error::TagError;
pub use gate::{AccessGate, AccessView, Guarded, Requirement};
pub use navigation::{App, Page, find_page, visible_items};
pub use permission::Permission;
pub use role::Role;
pub use route::{RouteDecision, RouteGuard, landing_route};
pub use session::{ActorSource, SessionStore};
pub use table::{RoleTable, default_permissions};

#[doc(hidden)]
pub use hostel_errors as __errors;

/// 权限检查宏
///
/// 用于服务端处理函数：不满足时以 `AppError::Forbidden` 提前返回。
#[macro_export]
macro_rules! require_permission {
    ($view:expr, $permission:expr) => {
        if !$view.has_permission($permission) {
            return Err($crate::__errors::AppError::forbidden(format!(
                "Missing permission: {}",
                $permission
            ))
            .into());
        }
    };
}

/// 角色检查宏
#[macro_export]
macro_rules! require_role {
    ($view:expr, $role:expr) => {
        if !$view.has_role($role) {
            return Err($crate::__errors::AppError::forbidden(format!(
                "Missing role: {}",
                $role
            ))
            .into());
        }
    };
}
