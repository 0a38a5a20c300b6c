//! Auth module — the token gateway in front of the record store.
//!
//! # Responsibilities
//!
//! - **Login** — verify credentials against the injected
//!   [`AccountDirectory`](roster_core::AccountDirectory), issue a signed,
//!   time-bounded access token.
//! - **Authorize** — validate the bearer token on every protected request
//!   and enforce the verb policy (`PUT`/`DELETE` require `admin`) before
//!   any business logic runs.
//!
//! The gateway never touches the record store; it knows only the
//! directory trait. Issued tokens carry no revocation state — a token is
//! valid until its expiry unless the signing secret is rotated.
//!
//! # Usage
//!
//! ```ignore
//! use auth::{AuthModule, service::{AuthService, GateConfig}};
//!
//! let svc = AuthService::new(directory, GateConfig::default());
//! let module = AuthModule::new(svc);
//! let router = module.routes(); // POST /login
//! ```

pub mod api;
pub mod model;
pub mod service;

use std::sync::Arc;

use axum::Router;

use roster_core::Module;

use crate::service::AuthService;

/// Auth module implementing the Module trait.
pub struct AuthModule {
    service: Arc<AuthService>,
}

impl AuthModule {
    pub fn new(service: Arc<AuthService>) -> Self {
        Self { service }
    }

    /// Get a reference to the underlying AuthService.
    pub fn service(&self) -> &Arc<AuthService> {
        &self.service
    }
}

impl Module for AuthModule {
    fn name(&self) -> &str {
        "auth"
    }

    fn routes(&self) -> Router {
        api::router(self.service.clone())
    }
}
