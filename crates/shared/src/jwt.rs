//! JWT token generation and validation.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;
use uuid::Uuid;

use crate::auth::Claims;

/// Token signing settings.
#[derive(Debug, Clone)]
pub struct JwtSettings {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Access token lifetime in seconds.
    pub access_token_expires_secs: i64,
}

impl Default for JwtSettings {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            access_token_expires_secs: 900,
        }
    }
}

/// Errors that can occur during JWT operations.
#[derive(Debug, Error)]
pub enum JwtError {
    /// Token encoding failed.
    #[error("failed to encode token: {0}")]
    EncodingError(String),

    /// Token decoding failed.
    #[error("failed to decode token: {0}")]
    DecodingError(String),

    /// Token has expired.
    #[error("token has expired")]
    Expired,
}

/// JWT service for token operations.
#[derive(Clone)]
pub struct JwtService {
    settings: JwtSettings,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("access_token_expires_secs", &self.settings.access_token_expires_secs)
            .field("keys", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    /// Creates a new JWT service with the given settings.
    #[must_use]
    pub fn new(settings: JwtSettings) -> Self {
        let encoding_key = EncodingKey::from_secret(settings.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(settings.secret.as_bytes());
        Self {
            settings,
            encoding_key,
            decoding_key,
        }
    }

    /// Issues an access token for a user.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::EncodingError` if token generation fails.
    pub fn generate_access_token(&self, user_id: Uuid) -> Result<String, JwtError> {
        let expires_at = Utc::now() + Duration::seconds(self.settings.access_token_expires_secs);
        let claims = Claims::new(user_id, expires_at);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingError(e.to_string()))
    }

    /// Validates and decodes a token.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::Expired` if the token has expired and
    /// `JwtError::DecodingError` if it is malformed or badly signed.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::DecodingError(e.to_string()),
            })
    }
}
