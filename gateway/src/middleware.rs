//! 中间件

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use hostel_auth_core::{AccessGate, AccessView, Page, RouteDecision, RouteGuard};
use hostel_errors::AppError;
use metrics::counter;
use std::sync::Arc;
use tracing::debug;

use crate::error::{ApiError, problem_response};
use crate::state::AppState;

/// 当前请求的访问视图提取器
///
/// 应该在 access_snapshot_middleware 之后使用
pub struct CurrentAccess(pub AccessView);

impl<S> FromRequestParts<S> for CurrentAccess
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AccessView>()
            .cloned()
            .map(CurrentAccess)
            .ok_or_else(|| {
                ApiError::from(AppError::internal(
                    "Missing access view in request extensions (access_snapshot_middleware may not have run)",
                ))
            })
    }
}

/// 每个请求只读取一次当前 Actor，并注入到请求扩展中
pub async fn access_snapshot_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let view = state.gate.snapshot();
    request.extensions_mut().insert(view);
    next.run(request).await
}

/// 单个页面的保护配置
#[derive(Clone)]
pub struct PageProtection {
    pub page: &'static Page,
    pub gate: AccessGate,
    pub route_guard: RouteGuard,
    pub denied_title: Arc<str>,
}

impl PageProtection {
    pub fn new(page: &'static Page, state: &AppState) -> Self {
        Self {
            page,
            gate: state.gate.clone(),
            route_guard: state.route_guard.clone(),
            denied_title: state.denied_title.clone(),
        }
    }
}

/// 页面保护中间件
///
/// 通过则继续；未登录重定向到登录页；已登录但无权限重定向到角色落地页。
pub async fn protect_page(
    State(protection): State<PageProtection>,
    request: Request,
    next: Next,
) -> Response {
    let view = request
        .extensions()
        .get::<AccessView>()
        .cloned()
        .unwrap_or_else(|| protection.gate.snapshot());

    let page = protection.page;
    let decision = protection
        .route_guard
        .resolve(&view, page.path, page.requirement);

    let allowed = if decision == RouteDecision::Render { "true" } else { "false" };
    counter!(
        "route_access_total",
        "requirement" => page.requirement.kind(),
        "allowed" => allowed
    )
    .increment(1);

    match decision {
        RouteDecision::Render => next.run(request).await,
        RouteDecision::Redirect(target) => {
            debug!(path = page.path, requirement = %page.requirement, %target, "Redirecting");
            Redirect::to(&target).into_response()
        }
        RouteDecision::Denied => {
            debug!(path = page.path, requirement = %page.requirement, "Rendering denial");
            denied_response(&protection.denied_title, page)
        }
    }
}

fn denied_response(title: &str, page: &Page) -> Response {
    let mut problem = AppError::forbidden(format!("{} requires {}", page.path, page.requirement))
        .to_problem_details()
        .with_instance(page.path);
    problem.title = title.to_string();

    problem_response(problem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{
            StatusCode,
            header::{CONTENT_TYPE, LOCATION},
        },
        middleware,
        routing::get,
    };
    use hostel_auth_core::{Actor, Permission, Role, RoleTable, find_page};
    use hostel_config::AccessConfig;
    use tower::ServiceExt;

    async fn handler() -> impl IntoResponse {
        "OK"
    }

    fn app(state: &AppState, path: &'static str) -> Router {
        let page = find_page(path).unwrap();
        Router::new()
            .route(path, get(handler))
            .route_layer(middleware::from_fn_with_state(
                PageProtection::new(page, state),
                protect_page,
            ))
            .layer(middleware::from_fn_with_state(
                state.clone(),
                access_snapshot_middleware,
            ))
    }

    fn get_request(path: &str) -> Request {
        axum::http::Request::builder()
            .uri(path)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_granted_page_runs_handler() {
        let state = AppState::new(&AccessConfig::default(), RoleTable::builtin()).unwrap();
        state.session.login(Actor::with_role("A", Role::Accountant));

        let response = app(&state, "/finance").oneshot(get_request("/finance")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_anonymous_redirects_to_login() {
        let state = AppState::new(&AccessConfig::default(), RoleTable::builtin()).unwrap();

        let response = app(&state, "/dashboard").oneshot(get_request("/dashboard")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/login");
    }

    #[tokio::test]
    async fn test_denied_actor_redirects_to_landing() {
        let state = AppState::new(&AccessConfig::default(), RoleTable::builtin()).unwrap();
        state.session.login(Actor::with_role("S", Role::Student));

        let response = app(&state, "/settings").oneshot(get_request("/settings")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/portal");
    }

    #[tokio::test]
    async fn test_denied_on_landing_page_renders_forbidden() {
        let access = AccessConfig {
            denied_title: "No entry".to_string(),
            ..AccessConfig::default()
        };
        let table = RoleTable::from_entries([(Role::Admin, vec![Permission::ViewDashboard])]);
        let state = AppState::new(&access, table).unwrap();
        state.session.login(Actor::with_role("K", Role::KitchenStaff));

        let response = app(&state, "/meals").oneshot(get_request("/meals")).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/problem+json");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["title"], "No entry");
        assert_eq!(json["instance"], "/meals");
    }

    #[tokio::test]
    async fn test_missing_snapshot_layer_still_checks() {
        let state = AppState::new(&AccessConfig::default(), RoleTable::builtin()).unwrap();
        let page = find_page("/users").unwrap();
        let app = Router::new()
            .route("/users", get(handler))
            .route_layer(middleware::from_fn_with_state(
                PageProtection::new(page, &state),
                protect_page,
            ));

        let response = app.oneshot(get_request("/users")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    #[tokio::test]
    async fn test_current_access_without_snapshot_is_internal_error() {
        async fn whoami(CurrentAccess(view): CurrentAccess) -> String {
            view.is_authenticated().to_string()
        }

        let app = Router::new().route("/whoami", get(whoami));

        let response = app.oneshot(get_request("/whoami")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/problem+json");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], 500);
    }
}
