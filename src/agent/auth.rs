//! Bearer-token verification for agent routes.

use crate::config::Secret;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims carried by an admin user token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminClaims {
    /// Admin user email.
    pub email: String,
    /// Given name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Family name.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Team the user acts for.
    #[serde(default)]
    pub team: Option<String>,
    /// Expiry, seconds since the Unix epoch.
    pub exp: u64,
}

/// Reasons a request is not authenticated.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// No `Authorization` header was sent.
    #[error("missing authorization header")]
    MissingHeader,

    /// The header is not of the form `Bearer <token>`.
    #[error("authorization header is not a bearer token")]
    NotBearer,

    /// The token failed signature, algorithm or expiry checks.
    #[error("invalid token: {0}")]
    InvalidToken(String),
}

/// Verifies HS256 tokens signed with the auth secret.
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Creates a verifier for tokens signed with `secret`.
    #[must_use]
    pub fn new(secret: &Secret) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp"]);
        Self {
            key: DecodingKey::from_secret(secret.expose().as_bytes()),
            validation,
        }
    }

    /// Verifies the value of an `Authorization` header.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] when the header is missing, is not a bearer
    /// token, or carries an invalid or expired token.
    pub fn verify_header(&self, header: Option<&str>) -> Result<AdminClaims, AuthError> {
        let value = header.ok_or(AuthError::MissingHeader)?;
        let token = value
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::NotBearer)?;
        decode::<AdminClaims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| AuthError::InvalidToken(err.to_string()))
    }
}
