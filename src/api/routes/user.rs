//! Current user endpoints

use axum::{extract::State, response::IntoResponse, Json};

use super::log_failure;
use crate::api::mock;
use crate::api::server::SharedState;
use crate::auth::{AuthenticatedUser, BearerToken};
use crate::backend::reason_phrase;
use crate::error::Result;

/// Profile of the token's owner, as the backend sees it
pub async fn me(
    State(state): State<SharedState>,
    BearerToken(token): BearerToken,
) -> Result<impl IntoResponse> {
    let reply = state
        .backend
        .get("/api/users/me", Some(&token))
        .await
        .map_err(|e| log_failure(&state.logger, "Failed to load current user", e))?;

    let status = reply.status;
    let user = reply
        .into_result(reason_phrase(status))
        .map_err(|e| log_failure(&state.logger, "Failed to load current user", e))?;

    Ok(Json(user))
}

/// Question history. Served from mock data; it is not filtered per user.
pub async fn history(
    State(state): State<SharedState>,
    AuthenticatedUser { user, .. }: AuthenticatedUser,
) -> impl IntoResponse {
    state.logger.debug(
        "Serving user history",
        &[serde_json::json!({ "username": user.username }).into()],
    );
    Json(mock::user_history())
}
