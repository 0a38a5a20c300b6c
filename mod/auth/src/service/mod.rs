mod token;

use std::sync::Arc;

use jsonwebtoken::{DecodingKey, EncodingKey, Validation};
use thiserror::Error;

use roster_core::AccountDirectory;

/// Gateway error type.
///
/// `MissingToken`, `InvalidToken`, and `InvalidCredentials` all surface
/// as HTTP 401; they stay distinct variants because callers (and tests)
/// care which gate rejected the request.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing authorization token")]
    MissingToken,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("directory error: {0}")]
    Directory(String),

    #[error("internal: {0}")]
    Internal(String),
}

impl From<AuthError> for roster_core::ServiceError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::MissingToken
            | AuthError::InvalidToken(_)
            | AuthError::InvalidCredentials => {
                roster_core::ServiceError::Unauthorized(e.to_string())
            }
            AuthError::Forbidden(m) => roster_core::ServiceError::Forbidden(m),
            AuthError::Directory(m) => roster_core::ServiceError::Storage(m),
            AuthError::Internal(m) => roster_core::ServiceError::Internal(m),
        }
    }
}

/// Configuration for the token gateway.
#[derive(Debug, Clone)]
pub struct GateConfig {
    /// JWT signing secret. Loaded once at startup, immutable for the
    /// process lifetime; rotation means restart.
    pub jwt_secret: String,
    /// Access token lifetime in seconds (default: 10h).
    pub token_ttl_secs: i64,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "roster-dev-secret-change-me".to_string(),
            token_ttl_secs: 36_000, // 10h
        }
    }
}

/// The token gateway. Holds the account directory and signing keys.
///
/// The encoding/decoding keys are derived from the configured secret at
/// construction and never change afterwards.
pub struct AuthService {
    pub(crate) directory: Arc<dyn AccountDirectory>,
    pub(crate) config: GateConfig,
    pub(crate) encoding_key: EncodingKey,
    pub(crate) decoding_key: DecodingKey,
    pub(crate) validation: Validation,
}

impl AuthService {
    pub fn new(directory: Arc<dyn AccountDirectory>, config: GateConfig) -> Arc<Self> {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        // No leeway: a token whose expiry has passed is expired, full stop.
        let mut validation = Validation::default();
        validation.leeway = 0;

        Arc::new(Self {
            directory,
            config,
            encoding_key,
            decoding_key,
            validation,
        })
    }
}
