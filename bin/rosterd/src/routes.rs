//! Route registration — collects module routes + system endpoints.

use std::sync::Arc;

use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;

use auth::service::AuthService;

/// Build the complete router with all routes.
///
/// Module routers carry their own path prefixes (`/login`,
/// `/api/v1/...`), so they are merged rather than nested. The token
/// gate is layered over everything; only the public allowlist
/// (`/login`, `/health`, `/version`) passes through unchecked.
pub fn build_router(auth_svc: Arc<AuthService>, module_routes: Vec<(&str, Router)>) -> Router {
    let mut app = Router::new()
        .route("/health", get(health))
        .route("/version", get(version));

    for (name, router) in module_routes {
        tracing::debug!("mounting routes for module '{}'", name);
        app = app.merge(router);
    }

    app.layer(middleware::from_fn_with_state(
        auth_svc,
        auth::api::require_auth,
    ))
}

async fn health() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "status": "ok",
    }))
}

async fn version() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": "rosterd",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
