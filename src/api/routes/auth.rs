//! Register, login and logout

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{json_body, log_failure, non_empty};
use crate::api::server::SharedState;
use crate::error::{Error, Result};

/// Cookie carrying a JSON snapshot of the logged-in user
pub const USER_COOKIE: &str = "user";
/// Cookie cleared on logout
pub const TOKEN_COOKIE: &str = "token";

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
}

pub async fn register(
    State(state): State<SharedState>,
    payload: std::result::Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    state
        .logger
        .debug("Received registration request via API", &[]);
    let req = json_body(payload)?;

    let (Some(username), Some(email), Some(password)) = (
        non_empty(req.username),
        non_empty(req.email),
        non_empty(req.password),
    ) else {
        state
            .logger
            .warning("API registration request missing required fields", &[]);
        return Err(Error::BadRequest("Missing required fields".to_string()));
    };

    let user = state
        .auth
        .register(&username, &email, &password)
        .await
        .map_err(|e| match e {
            // Registration failures the service phrased for the user are a 409
            Error::Auth(message) => Error::Conflict(message),
            other => other,
        })
        .map_err(|e| log_failure(&state.logger, "API registration failed", e))?;

    state.logger.info(
        "API registration successful",
        &[json!({ "username": user.username }).into()],
    );
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User registered successfully", "user": user })),
    ))
}

pub async fn login(
    State(state): State<SharedState>,
    jar: CookieJar,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    state.logger.debug("Received login request", &[]);
    let req = json_body(payload)?;

    let (Some(username), Some(password)) = (non_empty(req.username), non_empty(req.password))
    else {
        state
            .logger
            .warning("Login request missing username or password", &[]);
        return Err(Error::BadRequest(
            "Username and password are required".to_string(),
        ));
    };

    let success = state
        .auth
        .login(&username, &password)
        .await
        .map_err(|e| log_failure(&state.logger, "Login failed", e))?;

    state.logger.info(
        "User logged in successfully",
        &[json!({ "username": username }).into()],
    );

    let mut cookie = Cookie::new(USER_COOKIE, serde_json::to_string(&success.user)?);
    cookie.set_http_only(true);
    cookie.set_secure(state.config.cookie_secure());
    cookie.set_same_site(SameSite::Strict);
    cookie.set_path("/");

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            access_token: success.token,
            token_type: "bearer".to_string(),
        }),
    ))
}

/// Tokens are self-contained, so logging out only clears the cookie
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    let mut cookie = Cookie::build((TOKEN_COOKIE, "")).path("/").http_only(true).build();
    cookie.make_removal();

    (jar.add(cookie), Json(json!({ "message": "Logout successful" })))
}
