//! API 路由

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{StatusCode, Uri},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};
use hostel_auth_core::{
    App, Page, Permission, Requirement, Role, require_permission, visible_items,
};
use hostel_errors::AppError;
use hostel_telemetry::HealthStatus;
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use crate::error::{ApiError, ApiResult};
use crate::middleware::{CurrentAccess, access_snapshot_middleware};
use crate::pages::page_routes;
use crate::security_headers::security_headers_middleware;
use crate::session::session_routes;
use crate::state::AppState;

/// 固定路由；登录页路径不能与之重复
pub const FIXED_ROUTES: &[&str] = &[
    "/health",
    "/ready",
    "/metrics",
    "/api/session",
    "/api/session/login",
    "/api/session/logout",
    "/api/navigation",
    "/api/access",
    "/api/access/table",
];

/// 组装完整的应用路由
///
/// `state` 由 [`AppState::new`] 构造时已校验登录页路径。
pub fn app(state: AppState) -> Router {
    let login_route = state.route_guard.login_route().to_string();

    Router::new()
        .merge(health_routes())
        .merge(session_routes())
        .merge(access_routes())
        .merge(page_routes(&state))
        .route(&login_route, get(login_page))
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            access_snapshot_middleware,
        ))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(render_metrics))
}

fn access_routes() -> Router<AppState> {
    Router::new()
        .route("/api/navigation", get(navigation))
        .route("/api/access", get(check_access))
        .route("/api/access/table", get(role_table))
}

async fn not_found(uri: Uri) -> ApiError {
    AppError::not_found(format!("No route for {}", uri.path())).into()
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    let mut status = HealthStatus::new();

    let missing = state.gate.table().missing_roles();
    let message = (!missing.is_empty()).then(|| {
        let roles: Vec<&str> = missing.iter().map(Role::as_str).collect();
        format!("unmapped roles: {}", roles.join(", "))
    });
    status.add_check("role_table", missing.is_empty(), message);

    let code = if status.healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(status))
}

async fn render_metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => handle.render().into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

#[derive(Debug, Serialize)]
pub struct LoginPage {
    pub title: &'static str,
    pub authenticated: bool,
}

async fn login_page(CurrentAccess(view): CurrentAccess) -> Json<LoginPage> {
    Json(LoginPage {
        title: "Sign in",
        authenticated: view.is_authenticated(),
    })
}

#[derive(Debug, Deserialize)]
pub struct NavigationQuery {
    pub app: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NavigationResponse {
    pub app: App,
    pub items: Vec<&'static Page>,
}

async fn navigation(
    CurrentAccess(view): CurrentAccess,
    Query(query): Query<NavigationQuery>,
) -> ApiResult<Json<NavigationResponse>> {
    let app = match query.app.as_deref() {
        Some(raw) => raw.parse::<App>().map_err(AppError::validation)?,
        None => App::Console,
    };

    Ok(Json(NavigationResponse {
        app,
        items: visible_items(app, &view),
    }))
}

#[derive(Debug, Deserialize)]
pub struct AccessQuery {
    pub permission: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AccessResponse {
    pub requirement: String,
    pub allowed: bool,
}

/// 单项检查；无法识别的标签直接判定为拒绝
async fn check_access(
    CurrentAccess(view): CurrentAccess,
    Query(query): Query<AccessQuery>,
) -> ApiResult<Json<AccessResponse>> {
    let (requirement, parsed) = match (query.permission, query.role) {
        (Some(permission), None) => {
            let parsed = permission.parse::<Permission>().ok().map(Requirement::from);
            (format!("permission:{}", permission), parsed)
        }
        (None, Some(role)) => {
            let parsed = role.parse::<Role>().ok().map(Requirement::from);
            (format!("role:{}", role), parsed)
        }
        _ => {
            return Err(AppError::validation("exactly one of `permission` or `role` is required").into());
        }
    };

    let allowed = parsed.is_some_and(|requirement| view.check(requirement));
    Ok(Json(AccessResponse {
        requirement,
        allowed,
    }))
}

#[derive(Debug, Serialize)]
pub struct RoleEntry {
    pub role: Role,
    pub permissions: Vec<Permission>,
}

async fn role_table(
    State(state): State<AppState>,
    CurrentAccess(view): CurrentAccess,
) -> ApiResult<Json<Vec<RoleEntry>>> {
    if !view.is_authenticated() {
        return Err(AppError::unauthenticated("Sign in to view the role table").into());
    }
    require_permission!(view, Permission::ManageUsers);

    let table = state.gate.table();
    let entries = Role::ALL
        .into_iter()
        .filter_map(|role| {
            table
                .permissions(role)
                .map(|permissions| RoleEntry { role, permissions })
        })
        .collect();
    Ok(Json(entries))
}
