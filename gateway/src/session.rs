//! 会话路由
//!
//! 只负责切换当前 Actor；身份校验不在本服务范围内。

use axum::{
    Router,
    extract::{Json, State},
    routing::{get, post},
};
use hostel_auth_core::{Actor, Permission, Role, landing_route};
use hostel_common::ActorId;
use hostel_errors::AppError;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ApiResult;
use crate::middleware::CurrentAccess;
use crate::state::AppState;

pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/api/session", get(current_session))
        .route("/api/session/login", post(login))
        .route("/api/session/logout", post(logout))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub id: Option<String>,
    pub name: String,
    pub role: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub actor: Option<Actor>,
    pub permissions: Vec<Permission>,
    pub landing_route: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
    pub message: Option<String>,
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<SessionResponse>> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::validation("name must not be empty").into());
    }

    let role = req
        .role
        .parse::<Role>()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let id = match req.id.as_deref() {
        Some(raw) => ActorId::from_string(raw)
            .map_err(|e| AppError::validation(format!("Invalid actor id: {}", e)))?,
        None => ActorId::new(),
    };

    let actor = Actor::new(id, name, role);
    if let Some(previous) = state.session.login(actor.clone()) {
        info!(actor_id = %previous.id, role = %previous.role, "Replacing active actor");
    }
    info!(actor_id = %actor.id, role = %actor.role, "Actor logged in");

    let permissions = state.gate.table().permissions(role).unwrap_or_default();
    Ok(Json(SessionResponse {
        landing_route: Some(landing_route(actor.role)),
        actor: Some(actor),
        permissions,
    }))
}

async fn logout(State(state): State<AppState>) -> Json<SuccessResponse> {
    match state.session.logout() {
        Some(actor) => {
            info!(actor_id = %actor.id, role = %actor.role, "Actor logged out");
            Json(SuccessResponse {
                success: true,
                message: None,
            })
        }
        None => Json(SuccessResponse {
            success: true,
            message: Some("No active session".to_string()),
        }),
    }
}

async fn current_session(CurrentAccess(view): CurrentAccess) -> Json<SessionResponse> {
    Json(SessionResponse {
        actor: view.actor().cloned(),
        permissions: view.granted_permissions(),
        landing_route: view.actor().map(|actor| landing_route(actor.role)),
    })
}
