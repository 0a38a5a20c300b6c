use serde::{Deserialize, Serialize};

use roster_core::Role;

/// Credentials supplied once at login. Never persisted by the gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// JWT claims payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the account username.
    pub sub: String,
    /// Role at issuance time. Trusted for the token's full lifetime.
    pub role: Role,
    /// Issued at (unix timestamp).
    pub iat: i64,
    /// Expiration (unix timestamp).
    pub exp: i64,
}

/// The authenticated identity derived from a verified token.
///
/// Created per request by `authorize`, never mutated, discarded when the
/// request completes.
#[derive(Debug, Clone)]
pub struct Principal {
    pub username: String,
    pub role: Role,
    /// Token expiry (unix timestamp).
    pub expires_at: i64,
}

impl From<Claims> for Principal {
    fn from(claims: Claims) -> Self {
        Self {
            username: claims.sub,
            role: claims.role,
            expires_at: claims.exp,
        }
    }
}
