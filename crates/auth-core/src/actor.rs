//! 当前登录用户

use hostel_common::ActorId;
use serde::{Deserialize, Serialize};

use crate::role::Role;

/// 已认证的用户
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub display_name: String,
    pub role: Role,
}

impl Actor {
    pub fn new(id: ActorId, display_name: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            role,
        }
    }

    /// 使用新生成的 ID 创建
    pub fn with_role(display_name: impl Into<String>, role: Role) -> Self {
        Self::new(ActorId::new(), display_name, role)
    }
}
