//! Hostel administration gateway
//!
//! 会话切换、导航菜单与受保护页面

mod error;
mod middleware;
mod pages;
mod routing;
mod security_headers;
mod session;
mod state;

use std::net::SocketAddr;

use hostel_auth_core::RoleTable;
use hostel_config::AppConfig;
use hostel_telemetry::{init_metrics, init_tracing, init_tracing_json};
use tracing::{info, warn};

use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // 加载配置
    let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    let config = AppConfig::load(&config_dir)?;

    // 初始化 tracing
    if config.telemetry.json {
        init_tracing_json(&config.telemetry.log_level);
    } else {
        init_tracing(&config.telemetry.log_level);
    }

    let metrics = init_metrics()?;

    let table = RoleTable::builtin();
    let missing = table.missing_roles();
    if !missing.is_empty() {
        warn!(?missing, "Role table does not cover every role; those actors are denied everything");
    }

    let state = AppState::new(&config.access, table)?.with_metrics(metrics);
    let app = routing::app(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!(%addr, app = %config.app_name, env = %config.app_env, "Starting gateway");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
