// ABOUTME: JWT bearer authentication for the LiftLog REST API
// ABOUTME: HS256 token generation and validation with detailed expiry and signature errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftLog Contributors

//! # Authentication
//!
//! Every data route requires `Authorization: Bearer <jwt>`. Tokens are HS256
//! signed with the server secret and carry the user id in `sub`. Token
//! issuance for end users lives outside this server; [`AuthManager::generate_token`]
//! exists for tooling and tests.

use crate::constants::service_names;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Duration, Utc};
use http::HeaderMap;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};
use uuid::Uuid;

/// `JWT` validation error with detailed information
#[derive(Debug, Clone)]
pub enum JwtValidationError {
    /// Token has expired
    TokenExpired {
        /// When the token expired
        expired_at: DateTime<Utc>,
        /// Current time for reference
        current_time: DateTime<Utc>,
    },
    /// Token signature or claims are invalid
    TokenInvalid {
        /// Reason for invalidity
        reason: String,
    },
    /// Token is malformed (not proper `JWT` format)
    TokenMalformed {
        /// Details about malformation
        details: String,
    },
}

impl fmt::Display for JwtValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TokenExpired {
                expired_at,
                current_time,
            } => {
                let ago = current_time.signed_duration_since(*expired_at);
                if ago.num_minutes() < 60 {
                    write!(
                        f,
                        "JWT token expired {} minutes ago at {}",
                        ago.num_minutes(),
                        expired_at.format("%Y-%m-%d %H:%M:%S UTC")
                    )
                } else {
                    write!(
                        f,
                        "JWT token expired {} hours ago at {}",
                        ago.num_hours(),
                        expired_at.format("%Y-%m-%d %H:%M:%S UTC")
                    )
                }
            }
            Self::TokenInvalid { reason } => write!(f, "JWT token is invalid: {reason}"),
            Self::TokenMalformed { details } => write!(f, "JWT token is malformed: {details}"),
        }
    }
}

impl std::error::Error for JwtValidationError {}

impl From<JwtValidationError> for AppError {
    fn from(error: JwtValidationError) -> Self {
        match error {
            JwtValidationError::TokenExpired { .. } => Self::auth_expired(),
            other => Self::auth_invalid(other.to_string()),
        }
    }
}

/// `JWT` claims for user authentication
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User `ID`
    pub sub: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
    /// Audience (who the token is intended for)
    pub aud: String,
}

/// Issues and validates HS256 bearer tokens
#[derive(Clone)]
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry_hours: i64,
}

impl fmt::Debug for AuthManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthManager")
            .field("token_expiry_hours", &self.token_expiry_hours)
            .finish_non_exhaustive()
    }
}

impl AuthManager {
    /// Create a manager signing with `secret`
    #[must_use]
    pub fn new(secret: &[u8], token_expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            token_expiry_hours,
        }
    }

    /// Generate a token for `user_id`
    ///
    /// # Errors
    ///
    /// Returns an internal error if encoding fails
    pub fn generate_token(&self, user_id: Uuid) -> AppResult<String> {
        self.generate_token_with_expiry(user_id, Duration::hours(self.token_expiry_hours))
    }

    /// Generate a token valid for `lifetime`; negative lifetimes yield expired tokens
    ///
    /// # Errors
    ///
    /// Returns an internal error if encoding fails
    pub fn generate_token_with_expiry(&self, user_id: Uuid, lifetime: Duration) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
            aud: service_names::LIFTLOG_SERVER.to_owned(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
    }

    /// Validate a token and return its claims
    ///
    /// # Errors
    ///
    /// Returns a [`JwtValidationError`] if the token is malformed, has a bad
    /// signature or audience, or has expired
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtValidationError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_audience(&[service_names::LIFTLOG_SERVER]);

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| Self::convert_jwt_error(&e))?;

        let current_time = Utc::now();
        if current_time.timestamp() > claims.exp {
            let expired_at = DateTime::from_timestamp(claims.exp, 0).unwrap_or(current_time);
            warn!(user.id = %claims.sub, expired_at = %expired_at.to_rfc3339(), "JWT token expired");
            return Err(JwtValidationError::TokenExpired {
                expired_at,
                current_time,
            });
        }

        Ok(claims)
    }

    /// Validate a token and return the user id it was issued for
    ///
    /// # Errors
    ///
    /// Returns `AUTH_EXPIRED` for expired tokens and `AUTH_INVALID` otherwise
    pub fn user_id_from_token(&self, token: &str) -> AppResult<Uuid> {
        let claims = self.validate_token(token)?;
        Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::auth_invalid("Token subject is not a valid user id"))
    }

    /// Authenticate a request from its `Authorization` header
    ///
    /// # Errors
    ///
    /// Returns `AUTH_REQUIRED` when no bearer token is present, otherwise the
    /// token validation error
    pub fn authenticate(&self, headers: &HeaderMap) -> AppResult<Uuid> {
        let token = headers
            .get(http::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(AppError::auth_required)?;

        let user_id = self.user_id_from_token(token)?;
        debug!(user.id = %user_id, "Authenticated request");
        Ok(user_id)
    }

    /// Convert JWT library errors to detailed validation errors
    fn convert_jwt_error(e: &jsonwebtoken::errors::Error) -> JwtValidationError {
        use jsonwebtoken::errors::ErrorKind;
        warn!("JWT token validation failed: {:?}", e);

        match e.kind() {
            ErrorKind::InvalidSignature => JwtValidationError::TokenInvalid {
                reason: "Token signature verification failed".into(),
            },
            ErrorKind::InvalidAudience => JwtValidationError::TokenInvalid {
                reason: "Token was issued for another audience".into(),
            },
            ErrorKind::InvalidToken => JwtValidationError::TokenMalformed {
                details: "Token format is invalid".into(),
            },
            ErrorKind::Base64(base64_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid base64: {base64_err}"),
            },
            ErrorKind::Json(json_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid JSON: {json_err}"),
            },
            _ => JwtValidationError::TokenInvalid {
                reason: format!("Token validation failed: {e}"),
            },
        }
    }
}

/// Generate a random hex-encoded `JWT` secret for development use
#[must_use]
pub fn generate_jwt_secret() -> String {
    let mut secret = [0u8; 64];
    rand::thread_rng().fill(&mut secret[..]);
    hex::encode(secret)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_secret_is_hex() {
        let secret = generate_jwt_secret();
        assert_eq!(secret.len(), 128);
        assert!(secret.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_missing_header_requires_auth() {
        let manager = AuthManager::new(b"test-secret", 24);
        assert!(matches!(
            manager.authenticate(&HeaderMap::new()),
            Err(error) if error.code == crate::errors::ErrorCode::AuthRequired
        ));
    }
}
