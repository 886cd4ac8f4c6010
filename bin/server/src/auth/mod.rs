//! Identity bridging and authorization plumbing for the server.
//!
//! This module provides:
//! - Principal extraction from the trusted reverse-proxy headers
//! - The per-request bridge layer that reconciles principals against the
//!   local user directory
//! - Postgres-backed directory and registry implementations
//! - Authentication extractors for Axum routes
//!
//! # Authorization Model
//!
//! Identity verification happens upstream: an authenticating reverse
//! proxy validates the OIDC token and forwards the verified principal in
//! a request header. This server trusts those headers and must only be
//! reachable through the proxy.
//!
//! Authorization is entirely local. The bridge runs once per request,
//! auto-provisions first-seen principals, and attaches an
//! [`AuthContext`](campus_identity::AuthContext) to the request
//! extensions. Handlers gate on it through the extractors in
//! [`extract`].

pub mod bridge;
pub mod db;
pub mod extract;
pub mod principal;

use sqlx::PgPool;

use crate::config::IdentityConfig;

pub use bridge::bridge_layer;
pub use db::{PgRoleRegistry, PgUserDirectory};
pub use extract::{OptionalAuth, RequireAdmin, RequireAuth};

/// Shared application state.
pub struct AppState {
    /// Database connection pool.
    pub db_pool: PgPool,
    /// Identity bridging configuration.
    pub identity: IdentityConfig,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(db_pool: PgPool, identity: IdentityConfig) -> Self {
        Self { db_pool, identity }
    }

    /// Returns a directory backed by this state's pool.
    #[must_use]
    pub fn user_directory(&self) -> PgUserDirectory {
        PgUserDirectory::new(self.db_pool.clone())
    }

    /// Returns a role registry backed by this state's pool.
    #[must_use]
    pub fn role_registry(&self) -> PgRoleRegistry {
        PgRoleRegistry::new(self.db_pool.clone())
    }
}
