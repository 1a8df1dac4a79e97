//! 共享状态

use std::sync::Arc;

use hostel_auth_core::{AccessGate, RoleTable, RouteGuard, SessionStore, find_page};
use hostel_config::AccessConfig;
use hostel_errors::{AppError, AppResult};
use metrics_exporter_prometheus::PrometheusHandle;

use crate::routing::FIXED_ROUTES;

#[derive(Clone)]
pub struct AppState {
    pub session: Arc<SessionStore>,
    pub gate: AccessGate,
    pub route_guard: RouteGuard,
    pub denied_title: Arc<str>,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(access: &AccessConfig, table: RoleTable) -> AppResult<Self> {
        validate_login_route(&access.login_route)?;

        let session = Arc::new(SessionStore::new());
        let gate = AccessGate::new(session.clone(), Arc::new(table));

        Ok(Self {
            session,
            gate,
            route_guard: RouteGuard::new(access.login_route.clone()),
            denied_title: Arc::from(access.denied_title.as_str()),
            metrics: None,
        })
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// 登录页路径必须是字面量绝对路径，且不能与已有路由冲突
fn validate_login_route(route: &str) -> AppResult<()> {
    if !route.starts_with('/') {
        return Err(AppError::validation(format!(
            "access.login_route must start with '/': {:?}",
            route
        )));
    }
    if route.contains(['{', '}', '*']) {
        return Err(AppError::validation(format!(
            "access.login_route must be a literal path: {:?}",
            route
        )));
    }
    if find_page(route).is_some() || FIXED_ROUTES.contains(&route) {
        return Err(AppError::validation(format!(
            "access.login_route collides with an existing route: {}",
            route
        )));
    }
    Ok(())
}
