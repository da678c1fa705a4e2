//! Backend request forwarding

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use crate::config::BackendConfig;
use crate::error::{Error, Result};
use crate::logging::{LogArg, Logger};

/// Status and decoded body of a backend response
#[derive(Debug, Clone)]
pub struct BackendReply {
    pub status: u16,
    pub body: Value,
}

impl BackendReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body on success, otherwise a `Backend` error carrying the backend's
    /// message or `fallback` when it gave none
    pub fn into_result(self, fallback: &str) -> Result<Value> {
        if self.is_success() {
            return Ok(self.body);
        }
        let message = extract_detail(&self.body).unwrap_or_else(|| fallback.to_string());
        Err(Error::backend(self.status, message))
    }
}

/// Pull a human readable message out of a backend error body.
///
/// Understands `{"detail": "..."}`, validation lists of the form
/// `{"detail": [{"msg": "..."}]}`, `{"error": "..."}`, `{"message": "..."}`
/// and plain-text bodies.
pub fn extract_detail(body: &Value) -> Option<String> {
    match body {
        Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        Value::Object(map) => {
            for key in ["detail", "error", "message"] {
                match map.get(key) {
                    Some(Value::String(s)) if !s.is_empty() => return Some(s.clone()),
                    Some(Value::Array(items)) => {
                        if let Some(msg) = items
                            .iter()
                            .find_map(|item| item.get("msg").and_then(Value::as_str))
                        {
                            return Some(msg.to_string());
                        }
                    }
                    _ => {}
                }
            }
            None
        }
        _ => None,
    }
}

#[derive(Clone, Debug)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    logger: Logger,
}

impl BackendClient {
    pub fn new(config: &BackendConfig, logger: Logger) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            logger,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a prepared request and decode whatever came back.
    ///
    /// Only transport failures are errors here; non-success statuses are
    /// returned in the reply for the caller to map.
    pub async fn execute(
        &self,
        method: &Method,
        path: &str,
        builder: RequestBuilder,
        logged_body: Option<&Value>,
    ) -> Result<BackendReply> {
        let url = self.url(path);
        self.logger.log_request(method.as_str(), &url, logged_body);

        let response = builder.send().await.map_err(|e| {
            self.logger.error(
                &format!("Backend request to {} failed", url),
                &[LogArg::error(&e)],
            );
            Error::Http(e)
        })?;

        let status = response.status();
        let text = response.text().await?;
        let body = decode_body(&text);
        self.logger.log_response(method.as_str(), &url, status.as_u16(), &body);

        Ok(BackendReply {
            status: status.as_u16(),
            body,
        })
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> Result<BackendReply> {
        let builder = self.request(Method::GET, path, token);
        self.execute(&Method::GET, path, builder, None).await
    }

    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<BackendReply> {
        let builder = self.request(Method::POST, path, token).json(body);
        let logged = serde_json::to_value(body).ok();
        self.execute(&Method::POST, path, builder, logged.as_ref()).await
    }

    /// POST `application/x-www-form-urlencoded` fields
    pub async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> Result<BackendReply> {
        let builder = self.request(Method::POST, path, None).form(fields);
        // Field values may be credentials, so only names are logged.
        let names: Vec<&str> = fields.iter().map(|(name, _)| *name).collect();
        let logged = serde_json::json!({ "fields": names });
        self.execute(&Method::POST, path, builder, Some(&logged)).await
    }

    pub async fn post_multipart(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
        token: Option<&str>,
    ) -> Result<BackendReply> {
        let builder = self.request(Method::POST, path, token).multipart(form);
        self.execute(&Method::POST, path, builder, None).await
    }

    pub async fn patch_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<BackendReply> {
        let builder = self.request(Method::PATCH, path, token).json(body);
        let logged = serde_json::to_value(body).ok();
        self.execute(&Method::PATCH, path, builder, logged.as_ref()).await
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> Result<BackendReply> {
        let builder = self.request(Method::DELETE, path, token);
        self.execute(&Method::DELETE, path, builder, None).await
    }
}

fn decode_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Canonical reason phrase for a status, used when the backend gives no message
pub fn reason_phrase(status: u16) -> &'static str {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Backend request failed")
}
