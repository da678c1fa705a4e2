//! Client-side auth session
//!
//! Holds the logged-in user and token for a client, persisting only the raw
//! token in a [`TokenStore`]. The user is always re-derived by decoding.

use serde_json::json;
use std::sync::Arc;

use crate::auth::claims::User;
use crate::auth::service::{AuthService, LoginSuccess};
use crate::auth::store::{TokenStore, TOKEN_KEY};
use crate::error::Result;
use crate::logging::{LogArg, Logger};

/// Where `logout` sends the user
pub const LOGIN_PAGE: &str = "/login";

/// Page a freshly authenticated user is sent to
pub fn landing_path(user: &User) -> &'static str {
    if user.is_admin {
        "/admin"
    } else {
        "/chat"
    }
}

pub struct AuthSession {
    service: AuthService,
    store: Arc<dyn TokenStore>,
    logger: Logger,
    user: Option<User>,
    token: Option<String>,
    loading: bool,
}

impl AuthSession {
    /// New session in the loading state; call [`AuthSession::restore`] next
    pub fn new(service: AuthService, store: Arc<dyn TokenStore>, logger: Logger) -> Self {
        Self {
            service,
            store,
            logger,
            user: None,
            token: None,
            loading: true,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().map(|u| u.is_admin).unwrap_or(false)
    }

    /// Rebuild the session from the stored token.
    ///
    /// A token that cannot be read or decoded is removed and the session is
    /// left logged out. `loading` is cleared whatever happens.
    pub fn restore(&mut self) {
        self.restore_from_store();
        self.loading = false;
    }

    fn restore_from_store(&mut self) {
        let stored = match self.store.get(TOKEN_KEY) {
            Ok(stored) => stored,
            Err(e) => {
                self.logger
                    .error("Error reading stored token", &[LogArg::error(&e)]);
                self.forget();
                return;
            }
        };

        let Some(stored) = stored else {
            return;
        };

        match self.service.decode_token(&stored) {
            Some(user) => {
                self.logger.info(
                    "User session restored from token",
                    &[json!({ "username": user.username }).into()],
                );
                self.user = Some(user);
                self.token = Some(stored);
            }
            None => self.forget(),
        }
    }

    /// Log in and persist the token. Failures clear any previous session and
    /// are returned to the caller.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<User> {
        self.loading = true;
        let result = self.login_inner(username, password).await;
        self.loading = false;
        result
    }

    async fn login_inner(&mut self, username: &str, password: &str) -> Result<User> {
        let outcome = self.service.login(username, password).await.and_then(
            |LoginSuccess { token, user }| {
                self.store.set(TOKEN_KEY, &token)?;
                Ok((token, user))
            },
        );

        match outcome {
            Ok((token, user)) => {
                self.logger.info(
                    "User logged in via session",
                    &[json!({ "username": user.username }).into()],
                );
                self.user = Some(user.clone());
                self.token = Some(token);
                Ok(user)
            }
            Err(e) => {
                self.logger.error(
                    "Login error in session",
                    &[json!({ "error": e.to_string() }).into()],
                );
                self.forget();
                Err(e)
            }
        }
    }

    /// Register, then log in with the same credentials to obtain a token
    pub async fn register(&mut self, username: &str, email: &str, password: &str) -> Result<User> {
        self.loading = true;
        let result = self.register_inner(username, email, password).await;
        self.loading = false;
        result
    }

    async fn register_inner(&mut self, username: &str, email: &str, password: &str) -> Result<User> {
        if let Err(e) = self.service.register(username, email, password).await {
            self.logger.error(
                "Registration process failed in session",
                &[json!({ "error": e.to_string() }).into()],
            );
            return Err(e);
        }

        self.logger.info(
            "Registration successful, now logging in.",
            &[json!({ "username": username }).into()],
        );
        self.login_inner(username, password).await
    }

    /// Drop the session and return the page to navigate to
    pub fn logout(&mut self) -> &'static str {
        self.logger.info("User logging out from session", &[]);
        self.forget();
        LOGIN_PAGE
    }

    fn forget(&mut self) {
        if let Err(e) = self.store.remove(TOKEN_KEY) {
            self.logger
                .warning("Failed to remove stored token", &[LogArg::error(&e)]);
        }
        self.user = None;
        self.token = None;
    }
}
