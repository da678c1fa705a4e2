//! Chat forwarding

use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};

use super::{json_body, log_failure};
use crate::api::server::SharedState;
use crate::auth::BearerToken;
use crate::error::{Error, Result};

/// Forward a chat message to the backend agent with the caller's token
pub async fn ask(
    State(state): State<SharedState>,
    BearerToken(token): BearerToken,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let body = json_body(payload)?;
    state.logger.info(
        "Forwarding chat request to backend",
        &[json!({ "message": body.get("message") }).into()],
    );

    let reply = state
        .backend
        .post_json("/api/ask", &body, Some(&token))
        .await
        .map_err(|e| log_failure(&state.logger, "Unexpected error in chat proxy endpoint", e))?;

    if !reply.is_success() {
        state.logger.error(
            &format!("Backend chat request failed with status {}", reply.status),
            &[json!({ "error": reply.body }).into()],
        );
        return Err(Error::backend(
            reply.status,
            "Failed to get response from agent.",
        ));
    }

    Ok(Json(reply.body))
}
