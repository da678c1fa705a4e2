//! Request extractors for bearer authentication

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use crate::auth::claims::User;
use crate::auth::service::AuthService;
use crate::error::Error;

/// Token from an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Raw bearer token; rejects with 401 when the header is missing
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        bearer_token(&parts.headers)
            .map(|token| BearerToken(token.to_string()))
            .ok_or(Error::Unauthorized)
    }
}

/// Bearer token whose claims decoded; 401 otherwise
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub token: String,
    pub user: User,
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
    AuthService: FromRef<S>,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let BearerToken(token) = BearerToken::from_request_parts(parts, state).await?;
        let auth = AuthService::from_ref(state);
        let user = auth.verify_token(&token).ok_or(Error::Unauthorized)?;
        Ok(AuthenticatedUser { token, user })
    }
}

/// Authenticated user whose token claims `is_admin`; 403 otherwise
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub token: String,
    pub user: User,
}

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    AuthService: FromRef<S>,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthenticatedUser { token, user } =
            AuthenticatedUser::from_request_parts(parts, state).await?;
        if !user.is_admin {
            return Err(Error::Forbidden);
        }
        Ok(AdminUser { token, user })
    }
}
