//! Token validation middleware.
//!
//! Extracts the bearer token from `Authorization: Bearer <token>`,
//! validates it, enforces the verb policy, and stores the resulting
//! `Principal` in request extensions for handlers to access.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use roster_core::ServiceError;

use crate::service::AuthService;

/// Paths that don't require authentication.
const PUBLIC_PATHS: &[&str] = &["/login", "/health", "/version"];

/// Middleware gating every non-public route.
///
/// Runs before any record-store call: a request with no token, an
/// invalid or expired token, or an insufficient role for the verb is
/// rejected here and never reaches business logic.
pub async fn require_auth(
    State(svc): State<Arc<AuthService>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServiceError> {
    if is_public_path(request.uri().path()) {
        return Ok(next.run(request).await);
    }

    let header = request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok());

    let principal = svc.authorize(header, request.method())?;

    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}

/// Check if a request path is public (no auth required).
fn is_public_path(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path)
}

#[cfg(test)]
mod tests {
    use super::is_public_path;

    #[test]
    fn public_paths() {
        assert!(is_public_path("/login"));
        assert!(is_public_path("/health"));
        assert!(!is_public_path("/api/v1/person"));
        assert!(!is_public_path("/"));
    }
}
