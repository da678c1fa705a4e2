//! Service description endpoints

use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

use crate::api::server::SharedState;

pub async fn welcome(State(state): State<SharedState>) -> impl IntoResponse {
    Json(json!({
        "message": format!("Welcome to {}", state.config.app.description),
        "docs": "/docs",
        "status": "running",
        "version": state.config.app.version,
    }))
}

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "healthy" }))
}

pub async fn api_info(State(state): State<SharedState>) -> impl IntoResponse {
    let config = &state.config;
    Json(json!({
        "name": config.app.name,
        "version": config.app.version,
        "description": config.app.description,
        "server": {
            "hostname": config.server.host,
            "port": config.server.port,
        },
        "api": {
            "base_url": state.backend.base_url(),
            "timeout_secs": config.backend.timeout_secs,
        },
        "auth": {
            "verifies_signature": state.auth.decoder().verifies_signature(),
        },
        "log_level": state.logger.level(),
        "status": "operational",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime_secs": state.started_at.elapsed().as_secs(),
    }))
}
