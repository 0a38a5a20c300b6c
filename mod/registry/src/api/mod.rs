mod person;
mod user;

use std::sync::Arc;

use axum::Router;

use crate::service::RegistryService;

/// Shared application state.
pub type AppState = Arc<RegistryService>;

/// Build the registry API router, nested under `/api/v1`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api_routes())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(person::routes())
        .merge(user::routes())
}
