//! Registry module — transactional CRUD over person and user records.
//!
//! # Resources
//!
//! - **Person** — name, email, and IP address record
//! - **User** — login account (username, email, password, role); doubles
//!   as the account directory consumed by the auth module
//!
//! Every mutating operation runs inside a single transaction that first
//! re-checks the target row exists, then applies the change, then
//! commits — rolling back on every other exit. An update or delete
//! against a nonexistent identifier reports not-found and leaves the
//! store untouched.

pub mod api;
pub mod model;
pub mod service;
mod store_impls;

use std::sync::Arc;

use axum::Router;

use roster_core::Module;

use crate::service::RegistryService;

/// Registry module implementing the Module trait.
pub struct RegistryModule {
    service: Arc<RegistryService>,
}

impl RegistryModule {
    pub fn new(service: Arc<RegistryService>) -> Self {
        Self { service }
    }

    /// Get a reference to the underlying RegistryService.
    pub fn service(&self) -> &Arc<RegistryService> {
        &self.service
    }
}

impl Module for RegistryModule {
    fn name(&self) -> &str {
        "registry"
    }

    fn routes(&self) -> Router {
        api::router(self.service.clone())
    }
}
