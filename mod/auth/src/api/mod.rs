mod login;
mod middleware;

use std::sync::Arc;

use axum::routing::post;
use axum::Router;

use crate::service::AuthService;

pub use middleware::require_auth;

/// Shared application state.
pub type AppState = Arc<AuthService>;

/// Build the auth router: the public login endpoint.
pub fn router(svc: Arc<AuthService>) -> Router {
    Router::new()
        .route("/login", post(login::login))
        .with_state(svc)
}
