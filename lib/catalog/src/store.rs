//! Storage contracts for catalog entities.
//!
//! Persistence of programs and tags lives behind these traits; the
//! server provides Postgres-backed implementations.

use async_trait::async_trait;
use campus_core::ProgramId;

use crate::error::CatalogError;
use crate::program::Program;
use crate::tag::Tag;

/// Storage of programs.
#[async_trait]
pub trait ProgramStore: Send + Sync {
    /// Lists all programs.
    async fn find_all(&self) -> Result<Vec<Program>, CatalogError>;

    /// Looks up a program by ID.
    async fn find_by_id(&self, id: ProgramId) -> Result<Program, CatalogError>;

    /// Persists a new or updated program, including its tags and courses.
    async fn save(&self, program: Program) -> Result<Program, CatalogError>;

    /// Deletes a program and its owned courses.
    async fn delete_by_id(&self, id: ProgramId) -> Result<(), CatalogError>;
}

/// Storage of the shared tag catalog.
#[async_trait]
pub trait TagStore: Send + Sync {
    /// Lists all known tags.
    async fn find_all(&self) -> Result<Vec<Tag>, CatalogError>;

    /// Persists new tags created during reconciliation.
    async fn save_all(&self, tags: &[Tag]) -> Result<(), CatalogError>;
}
