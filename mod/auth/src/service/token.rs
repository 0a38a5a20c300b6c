use axum::http::Method;
use jsonwebtoken::{decode, encode, Header};

use roster_core::Role;

use crate::model::{Claims, Credentials, Principal};
use crate::service::{AuthError, AuthService};

impl AuthService {
    /// Verify credentials and issue a signed access token.
    ///
    /// The token encodes username, role, and a fixed validity window
    /// counted from issuance. Login has no other side effects: no
    /// lockout counters, no last-login bookkeeping.
    pub fn login(&self, creds: &Credentials) -> Result<String, AuthError> {
        let account = self
            .directory
            .find_account(&creds.username)
            .map_err(|e| AuthError::Directory(e.to_string()))?
            .ok_or(AuthError::InvalidCredentials)?;

        // Exact-match comparison against the stored secret, in whatever
        // form the directory provides it.
        if account.password != creds.password {
            return Err(AuthError::InvalidCredentials);
        }

        let now = chrono::Utc::now();
        let expires = now + chrono::Duration::seconds(self.config.token_ttl_secs);

        let claims = Claims {
            sub: account.username,
            role: account.role,
            iat: now.timestamp(),
            exp: expires.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("JWT encode failed: {}", e)))
    }

    /// Validate the Authorization header and enforce the verb policy.
    ///
    /// The header is expected as `Bearer <token>`; an absent header, a
    /// missing prefix, or an empty token all count as no token at all.
    /// Signature and expiry failures are both `InvalidToken`. The role
    /// encoded in the token is trusted for the token's full lifetime —
    /// there is no live directory re-check, so a role change takes
    /// effect only once the old token expires.
    ///
    /// This is a pure gate: it never touches the record store and holds
    /// no state across requests.
    pub fn authorize(
        &self,
        header: Option<&str>,
        method: &Method,
    ) -> Result<Principal, AuthError> {
        let token = header
            .and_then(|v| v.strip_prefix("Bearer "))
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingToken)?;

        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        let claims = token_data.claims;

        if requires_admin(method) && claims.role != Role::Admin {
            return Err(AuthError::Forbidden(format!(
                "{} requires admin role",
                method
            )));
        }

        Ok(Principal::from(claims))
    }
}

/// Verb policy: mutating verbs that remove or wholesale-replace a
/// resource are admin-only; reads and creates need any valid token.
fn requires_admin(method: &Method) -> bool {
    *method == Method::DELETE || *method == Method::PUT
}
