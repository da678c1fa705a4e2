//! Admin-only endpoints
//!
//! Every handler here takes an [`AdminUser`], so a missing token is a 401
//! and a non-admin token a 403 before anything is forwarded.

use axum::{
    extract::{rejection::JsonRejection, Multipart, Path, State},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{json_body, log_failure, non_empty};
use crate::api::cache::ADMIN_PAGE;
use crate::api::server::SharedState;
use crate::auth::AdminUser;
use crate::backend::reason_phrase;
use crate::error::{Error, Result};
use crate::logging::LogLevel;

const USERS_KEY: &str = "users";
const CONFIG_KEY: &str = "config";

#[derive(Debug, Deserialize)]
pub struct ConfigUpdate {
    pub key: Option<String>,
    pub value: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LogLevelRequest {
    pub level: Option<String>,
    #[serde(default)]
    pub logger_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LogLevelResponse {
    pub message: String,
    pub logger: String,
    pub level: LogLevel,
}

/// GET from the backend, serving and filling the admin page cache.
///
/// Entries are keyed by the caller's token, so a hit only returns what the
/// backend already released to that same token. Decoded claims alone never
/// unlock cached data.
async fn cached_get(state: &SharedState, key: &str, path: &str, token: &str) -> Result<Value> {
    let entry = format!("{}:{}", key, token);
    if let Some(hit) = state.cache.get(ADMIN_PAGE, &entry).await {
        state
            .logger
            .debug(&format!("Serving cached {} for {}", key, ADMIN_PAGE), &[]);
        return Ok(hit);
    }

    let reply = state.backend.get(path, Some(token)).await?;
    let status = reply.status;
    let value = reply.into_result(reason_phrase(status))?;
    state.cache.put(ADMIN_PAGE, &entry, value.clone()).await;
    Ok(value)
}

pub async fn get_config(
    State(state): State<SharedState>,
    AdminUser { token, .. }: AdminUser,
) -> Result<impl IntoResponse> {
    let config = cached_get(&state, CONFIG_KEY, "/api/admin/config", &token)
        .await
        .map_err(|e| log_failure(&state.logger, "Config GET error", e))?;
    Ok(Json(config))
}

pub async fn update_config(
    State(state): State<SharedState>,
    AdminUser { token, user }: AdminUser,
    payload: std::result::Result<Json<ConfigUpdate>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let update = json_body(payload)?;
    let (Some(key), Some(value)) = (non_empty(update.key), update.value) else {
        return Err(Error::BadRequest(
            "Invalid configuration: key and value are required".to_string(),
        ));
    };

    let reply = state
        .backend
        .post_json(
            "/api/admin/config",
            &json!({ "key": key, "value": value }),
            Some(&token),
        )
        .await
        .map_err(|e| log_failure(&state.logger, "Config POST error", e))?;
    let status = reply.status;
    let updated = reply
        .into_result(reason_phrase(status))
        .map_err(|e| log_failure(&state.logger, "Config POST error", e))?;

    state.cache.invalidate(ADMIN_PAGE).await;
    state.logger.info(
        "System configuration updated",
        &[json!({ "key": key, "updatedBy": user.username }).into()],
    );
    Ok(Json(updated))
}

pub async fn set_log_level(
    State(state): State<SharedState>,
    AdminUser { user, .. }: AdminUser,
    payload: std::result::Result<Json<LogLevelRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    state
        .logger
        .debug("Received log level update request", &[]);
    let req = json_body(payload)?;

    let level: LogLevel = match req.level.as_deref().unwrap_or("").parse() {
        Ok(level) => level,
        Err(e) => {
            state
                .logger
                .error("Invalid log level received", &[json!({ "level": req.level }).into()]);
            return Err(e);
        }
    };
    let logger_name = req.logger_name.unwrap_or_default();

    state.logger.set_level(level);
    state.logger.info(
        "Log level updated successfully",
        &[json!({ "level": level, "logger_name": logger_name, "updatedBy": user.username }).into()],
    );

    Ok(Json(LogLevelResponse {
        message: "Log level updated successfully".to_string(),
        logger: if logger_name.is_empty() {
            "root".to_string()
        } else {
            logger_name
        },
        level,
    }))
}

/// Forward an uploaded knowledge file to the backend
pub async fn upload(
    State(state): State<SharedState>,
    AdminUser { token, .. }: AdminUser,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    let mut file = None;
    let mut description = None;
    let mut source_type = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::BadRequest(e.body_text()))?
    {
        match field.name().unwrap_or("") {
            "file" => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| Error::BadRequest(e.body_text()))?;
                file = Some((filename, content_type, data));
            }
            "description" => {
                description = Some(field.text().await.map_err(|e| Error::BadRequest(e.body_text()))?)
            }
            "sourceType" => {
                source_type = Some(field.text().await.map_err(|e| Error::BadRequest(e.body_text()))?)
            }
            _ => {}
        }
    }

    let Some((filename, content_type, data)) = file else {
        return Err(Error::BadRequest("No file provided".to_string()));
    };
    let size = data.len();

    state.logger.info(
        "Forwarding knowledge upload",
        &[json!({
            "filename": filename,
            "size": size,
            "description": description,
            "sourceType": source_type,
        })
        .into()],
    );

    let part = reqwest::multipart::Part::bytes(data.to_vec())
        .file_name(filename.clone())
        .mime_str(&content_type)
        .map_err(|e| log_failure(&state.logger, "Upload error", Error::Http(e)))?;
    let form = reqwest::multipart::Form::new().part("file", part);

    let reply = state
        .backend
        .post_multipart("/api/admin/knowledge/upload", form, Some(&token))
        .await
        .map_err(|e| log_failure(&state.logger, "Upload error", e))?;
    let status = reply.status;
    let body = reply
        .into_result(reason_phrase(status))
        .map_err(|e| log_failure(&state.logger, "Upload error", e))?;

    Ok(Json(json!({
        "message": body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("File uploaded successfully"),
        "filename": filename,
        "size": size,
        "type": content_type,
    })))
}

pub async fn list_users(
    State(state): State<SharedState>,
    AdminUser { token, .. }: AdminUser,
) -> Result<impl IntoResponse> {
    let users = cached_get(&state, USERS_KEY, "/api/admin/users", &token)
        .await
        .map_err(|e| log_failure(&state.logger, "Admin users error", e))?;
    Ok(Json(users))
}

pub async fn update_user(
    State(state): State<SharedState>,
    AdminUser { token, .. }: AdminUser,
    Path(id): Path<String>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let changes = json_body(payload)?;
    let path = format!("/api/admin/users/{}", id);

    let reply = state
        .backend
        .patch_json(&path, &changes, Some(&token))
        .await
        .map_err(|e| log_failure(&state.logger, "Failed to update user", e))?;
    let status = reply.status;
    let user = reply
        .into_result(reason_phrase(status))
        .map_err(|e| log_failure(&state.logger, "Failed to update user", e))?;

    state.cache.invalidate(ADMIN_PAGE).await;
    Ok(Json(user))
}

pub async fn delete_user(
    State(state): State<SharedState>,
    AdminUser { token, .. }: AdminUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let path = format!("/api/admin/users/{}", id);

    let reply = state
        .backend
        .delete(&path, Some(&token))
        .await
        .map_err(|e| log_failure(&state.logger, "Failed to delete user", e))?;
    let status = reply.status;
    reply
        .into_result(reason_phrase(status))
        .map_err(|e| log_failure(&state.logger, "Failed to delete user", e))?;
    // The backend confirms a deletion with 204 and nothing else.
    if status != 204 {
        return Err(log_failure(
            &state.logger,
            "Failed to delete user",
            Error::backend(502, format!("Unexpected backend status {} on delete", status)),
        ));
    }

    state.cache.invalidate(ADMIN_PAGE).await;
    Ok(Json(json!({ "success": true })))
}
