//! Register/login against the backend and token decoding

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::auth::claims::{TokenDecoder, User};
use crate::backend::BackendClient;
use crate::error::{Error, Result};
use crate::logging::{LogArg, Logger};

const REGISTER_PATH: &str = "/api/auth/register";
const LOGIN_PATH: &str = "/api/auth/login";

/// Token and decoded user returned by a successful login
#[derive(Debug, Clone)]
pub struct LoginSuccess {
    pub token: String,
    pub user: User,
}

/// Body the backend returns from the login endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Stateless wrapper around the backend's auth endpoints.
///
/// Every operation returns a `Result`; transport failures are reported as
/// generic messages and the detail goes to the log.
#[derive(Clone, Debug)]
pub struct AuthService {
    backend: BackendClient,
    decoder: TokenDecoder,
    logger: Logger,
}

impl AuthService {
    pub fn new(backend: BackendClient, decoder: TokenDecoder, logger: Logger) -> Self {
        Self {
            backend,
            decoder,
            logger,
        }
    }

    pub fn decoder(&self) -> &TokenDecoder {
        &self.decoder
    }

    /// Create an account. The password is sent to the backend as given.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<User> {
        self.logger.debug(
            "Registration attempt",
            &[json!({ "username": username, "email": email }).into()],
        );

        let body = json!({ "username": username, "email": email, "password": password });
        let reply = match self.backend.post_json(REGISTER_PATH, &body, None).await {
            Ok(reply) => reply,
            Err(e) => {
                self.logger
                    .error("Error during registration API call", &[LogArg::error(&e)]);
                return Err(Error::Auth(
                    "An unexpected error occurred during registration.".to_string(),
                ));
            }
        };

        let status = reply.status;
        let value = reply.into_result("Registration failed").inspect_err(|e| {
            self.logger.warning(
                "Registration failed",
                &[json!({ "status": status, "error": e.to_string() }).into()],
            );
        })?;

        let user = registered_user(&value, username, email);
        self.logger.info(
            "User registered successfully",
            &[json!({ "username": username }).into()],
        );
        Ok(user)
    }

    /// Exchange credentials for a token (form-encoded) and decode it
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginSuccess> {
        self.logger
            .debug("Login attempt", &[json!({ "username": username }).into()]);

        let reply = match self
            .backend
            .post_form(LOGIN_PATH, &[("username", username), ("password", password)])
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                self.logger
                    .error("Error during login API call", &[LogArg::error(&e)]);
                return Err(Error::Auth(
                    "An unexpected error occurred during login.".to_string(),
                ));
            }
        };

        let status = reply.status;
        let value = reply.into_result("Invalid credentials").inspect_err(|e| {
            self.logger.warning(
                "Login failed",
                &[json!({ "status": status, "error": e.to_string() }).into()],
            );
        })?;

        let token = serde_json::from_value::<TokenResponse>(value)
            .ok()
            .and_then(|t| t.access_token)
            .filter(|t| !t.is_empty());
        let Some(token) = token else {
            self.logger
                .error("Login successful but no token received", &[]);
            return Err(Error::Auth("Login failed, please try again.".to_string()));
        };

        let user = match self.decoder.decode(&token) {
            Ok(claims) => User::from(claims),
            Err(e) => {
                self.logger
                    .error("Error decoding token after login", &[LogArg::error(&e)]);
                return Err(Error::Auth(
                    "An unexpected error occurred during login.".to_string(),
                ));
            }
        };

        self.logger.info(
            "User logged in successfully",
            &[json!({ "username": username }).into()],
        );
        Ok(LoginSuccess { token, user })
    }

    /// Resolve a token to a user.
    ///
    /// Unless a secret is configured this does not check the signature; it
    /// is the same decode as [`AuthService::decode_token`].
    pub fn verify_token(&self, token: &str) -> Option<User> {
        self.resolve(token, "Token verification failed")
    }

    pub fn decode_token(&self, token: &str) -> Option<User> {
        self.resolve(token, "Failed to decode token")
    }

    fn resolve(&self, token: &str, failure: &str) -> Option<User> {
        match self.decoder.decode(token) {
            Ok(claims) => Some(User::from(claims)),
            Err(e) => {
                self.logger.error(failure, &[LogArg::error(&e)]);
                None
            }
        }
    }
}

/// Build the user view from the backend's registration response, filling
/// gaps from the submitted form
fn registered_user(value: &serde_json::Value, username: &str, email: &str) -> User {
    let text = |key: &str| value.get(key).and_then(|v| v.as_str()).map(str::to_string);
    let id = match value.get("id") {
        Some(serde_json::Value::Number(n)) => n.to_string(),
        Some(serde_json::Value::String(s)) => s.clone(),
        _ => String::new(),
    };

    User {
        id,
        username: text("username").unwrap_or_else(|| username.to_string()),
        email: text("email").unwrap_or_else(|| email.to_string()),
        is_admin: value
            .get("is_admin")
            .and_then(|v| v.as_bool())
            .unwrap_or(false),
    }
}
