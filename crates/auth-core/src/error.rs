//! 标签解析错误

use thiserror::Error;

/// 角色 / 权限字符串无法识别
///
/// 只在边界（登录请求、查询参数）出现；门禁检查本身从不返回错误。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Unknown permission: {0}")]
    UnknownPermission(String),
}
