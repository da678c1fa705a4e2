//! API route handlers

pub mod admin;
pub mod agents;
pub mod auth;
pub mod chat;
pub mod info;
pub mod user;

use axum::{extract::rejection::JsonRejection, Json};

use crate::error::{Error, Result};
use crate::logging::{LogArg, Logger};

/// Unwrap a JSON body, turning extractor rejections into a 400
pub(crate) fn json_body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| Error::BadRequest(rejection.body_text()))
}

/// Log a handler failure at a level matching its kind and pass it on
pub(crate) fn log_failure(logger: &Logger, context: &str, err: Error) -> Error {
    match &err {
        Error::Backend { status, message } => logger.warning(
            context,
            &[serde_json::json!({ "status": status, "error": message }).into()],
        ),
        Error::Unauthorized | Error::Forbidden | Error::BadRequest(_) => {
            logger.warning(context, &[serde_json::json!({ "error": err.to_string() }).into()])
        }
        _ => logger.error(context, &[LogArg::error(&err)]),
    }
    err
}

/// `Some` only for present, non-blank strings
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
