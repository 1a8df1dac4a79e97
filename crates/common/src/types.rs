//! 通用类型定义

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 用户（Actor）ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From)]
#[display("{_0}")]
#[serde(transparent)]
pub struct ActorId(pub Uuid);

impl ActorId {
    pub fn new() -> Self {
        Self(crate::utils::new_id())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for ActorId {
    fn default() -> Self {
        Self::new()
    }
}
