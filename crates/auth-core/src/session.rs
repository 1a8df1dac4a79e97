//! 会话状态
//!
//! 当前 Actor 槽位只由登录 / 登出写入，门禁只读。

use std::sync::Arc;

use parking_lot::RwLock;

use crate::actor::Actor;

/// 读取"当前 Actor 或无"
pub trait ActorSource: Send + Sync {
    fn current_actor(&self) -> Option<Arc<Actor>>;
}

/// 固定 Actor，主要用于测试和离线场景
impl ActorSource for Option<Actor> {
    fn current_actor(&self) -> Option<Arc<Actor>> {
        self.clone().map(Arc::new)
    }
}

impl<S: ActorSource + ?Sized> ActorSource for Arc<S> {
    fn current_actor(&self) -> Option<Arc<Actor>> {
        (**self).current_actor()
    }
}

/// 会话存储
///
/// 同一时间最多一个活动 Actor。读取返回 `Arc` 快照，
/// 之后的登录 / 登出不会影响已经取得的快照。
#[derive(Debug, Default)]
pub struct SessionStore {
    current: RwLock<Option<Arc<Actor>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登录，替换并返回之前的 Actor
    pub fn login(&self, actor: Actor) -> Option<Arc<Actor>> {
        self.current.write().replace(Arc::new(actor))
    }

    /// 登出，返回被清除的 Actor
    pub fn logout(&self) -> Option<Arc<Actor>> {
        self.current.write().take()
    }

    pub fn current(&self) -> Option<Arc<Actor>> {
        self.current.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.read().is_some()
    }
}

impl ActorSource for SessionStore {
    fn current_actor(&self) -> Option<Arc<Actor>> {
        self.current()
    }
}
