//! Storage contracts for user records and role definitions.
//!
//! The identity bridge depends on these traits rather than a concrete
//! store so the core stays testable without a database. The server
//! provides Postgres-backed implementations.

use async_trait::async_trait;
use campus_core::UserId;

use crate::error::{DirectoryError, RegistryError};
use crate::role::Role;
use crate::user::User;

/// Read-only lookup of role definitions by name.
///
/// Roles are reference data; the registry never mutates them.
#[async_trait]
pub trait RoleRegistry: Send + Sync {
    /// Resolves a role by its exact name.
    ///
    /// Fails with [`RegistryError::NotFound`] when no such role exists;
    /// that outcome is permanent for the given name.
    async fn find_by_name(&self, name: &str) -> Result<Role, RegistryError>;
}

/// Storage of user records keyed by username.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Looks up a user by normalized (lowercase) username.
    ///
    /// Absence is a valid, expected outcome reported as `Ok(None)`.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DirectoryError>;

    /// Persists a new or updated user.
    ///
    /// Fails with [`DirectoryError::Conflict`] when the username or
    /// email uniqueness constraint is violated.
    async fn save(&self, user: User) -> Result<User, DirectoryError>;

    /// Deletes a user and, cascading, all of its role assignments.
    async fn delete_by_id(&self, id: UserId) -> Result<(), DirectoryError>;
}
