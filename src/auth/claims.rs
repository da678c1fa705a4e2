//! Session token decoding
//!
//! Tokens are issued by the backend. By default the gateway and the client
//! only *decode* them: the payload is read without checking the signature
//! or expiry, so the result is suitable for display and UI gating but is not
//! proof of identity. Configuring `auth.jwt_secret` switches the decoder to
//! full HS256 verification.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

/// Payload fields the backend puts in a session token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Username
    pub sub: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
    /// Backend user id; issued as an integer but accepted as a string too
    #[serde(default, deserialize_with = "id_as_string")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

fn id_as_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Int(i64),
    }

    Ok(match Option::<Id>::deserialize(deserializer)? {
        Some(Id::Text(s)) => s,
        Some(Id::Int(n)) => n.to_string(),
        None => String::new(),
    })
}

/// User view derived from a token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
}

impl From<TokenClaims> for User {
    fn from(claims: TokenClaims) -> Self {
        Self {
            id: claims.id,
            username: claims.sub,
            email: claims.email,
            is_admin: claims.is_admin,
        }
    }
}

/// Read a token's claims without verifying its signature or expiry
pub fn decode_claims(token: &str) -> Result<TokenClaims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .map_err(|e| Error::InvalidToken(e.to_string()))
}

/// Verify an HS256 token against a shared secret and return its claims
pub fn verify_claims(token: &str, secret: &[u8]) -> Result<TokenClaims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_aud = false;

    decode::<TokenClaims>(token, &DecodingKey::from_secret(secret), &validation)
        .map(|data| data.claims)
        .map_err(|e| Error::InvalidToken(e.to_string()))
}

/// Sign claims with an HS256 secret
pub fn sign_claims(claims: &TokenClaims, secret: &[u8]) -> Result<String> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| Error::Config(format!("Failed to create token: {}", e)))
}

/// Turns token strings into claims, decoding or verifying depending on
/// whether a secret was configured
#[derive(Clone, Default)]
pub struct TokenDecoder {
    secret: Option<Vec<u8>>,
}

impl TokenDecoder {
    /// Decode-only mode
    pub fn unverified() -> Self {
        Self { secret: None }
    }

    pub fn with_secret(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: Some(secret.into()),
        }
    }

    pub fn from_config(secret: Option<&str>) -> Self {
        match secret {
            Some(s) if !s.is_empty() => Self::with_secret(s.as_bytes()),
            _ => Self::unverified(),
        }
    }

    pub fn verifies_signature(&self) -> bool {
        self.secret.is_some()
    }

    pub fn decode(&self, token: &str) -> Result<TokenClaims> {
        match &self.secret {
            Some(secret) => verify_claims(token, secret),
            None => decode_claims(token),
        }
    }
}

impl std::fmt::Debug for TokenDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenDecoder")
            .field("verifies_signature", &self.verifies_signature())
            .finish()
    }
}
