//! Error types for the catalog crate.

use campus_core::{ProgramId, UserId};
use std::fmt;

/// Errors from catalog operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Program was not found by ID.
    ProgramNotFound { id: ProgramId },
    /// The owning user was not found.
    UserNotFound { id: UserId },
    /// The backing store failed.
    Storage { details: String },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProgramNotFound { id } => write!(f, "program '{id}' not found"),
            Self::UserNotFound { id } => write!(f, "user '{id}' not found"),
            Self::Storage { details } => write!(f, "catalog storage error: {details}"),
        }
    }
}

impl std::error::Error for CatalogError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn program_not_found_display() {
        let id = ProgramId::new();
        let err = CatalogError::ProgramNotFound { id };
        assert!(err.to_string().contains(&id.to_string()));
        assert!(err.to_string().contains("not found"));
    }
}
