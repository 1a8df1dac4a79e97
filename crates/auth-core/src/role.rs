//! 角色标签

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TagError;

/// 角色
///
/// 封闭集合；字符串形式使用 kebab-case（如 `kitchen-staff`）。
/// 角色之间没有继承关系。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Admin,
    Warden,
    Accountant,
    KitchenStaff,
    Student,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Admin,
        Role::Warden,
        Role::Accountant,
        Role::KitchenStaff,
        Role::Student,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Warden => "warden",
            Role::Accountant => "accountant",
            Role::KitchenStaff => "kitchen-staff",
            Role::Student => "student",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 精确匹配，不做大小写折叠
impl FromStr for Role {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| TagError::UnknownRole(s.to_string()))
    }
}
