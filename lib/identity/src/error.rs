//! Error types for the identity crate.
//!
//! - `RegistryError`: role registry lookups
//! - `DirectoryError`: user directory operations
//! - `BridgeError`: identity bridge failures that reach the caller

use std::fmt;

/// Errors from role registry lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No role with the requested name exists. Permanent for that call.
    NotFound { name: String },
    /// The backing store failed.
    Storage { details: String },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { name } => write!(f, "role '{name}' not found"),
            Self::Storage { details } => write!(f, "role registry storage error: {details}"),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Errors from user directory operations.
///
/// Absence of a user is not an error; `find_by_username` reports it as
/// `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// A uniqueness constraint (username or email) was violated.
    Conflict { constraint: String },
    /// No user with the given ID exists.
    NotFound { id: String },
    /// The backing store failed.
    Storage { details: String },
}

impl fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conflict { constraint } => {
                write!(f, "uniqueness violation on {constraint}")
            }
            Self::NotFound { id } => write!(f, "user '{id}' not found"),
            Self::Storage { details } => write!(f, "user directory storage error: {details}"),
        }
    }
}

impl std::error::Error for DirectoryError {}

/// Errors surfaced by the identity bridge.
///
/// Creation conflicts never appear here; the bridge recovers from them
/// internally by re-resolving the winner's record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// The configured default role does not exist. A configuration
    /// defect, not a per-request condition.
    MissingDefaultRole { name: String },
    /// A user creation conflict was observed but the winning record
    /// could not be re-resolved.
    ProvisioningRace { username: String },
    /// The user directory failed.
    Directory(DirectoryError),
    /// The role registry failed.
    Registry(RegistryError),
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDefaultRole { name } => {
                write!(f, "default role '{name}' is not configured in the registry")
            }
            Self::ProvisioningRace { username } => {
                write!(
                    f,
                    "user '{username}' conflicted on creation but was not found on re-fetch"
                )
            }
            Self::Directory(e) => write!(f, "user directory error: {e}"),
            Self::Registry(e) => write!(f, "role registry error: {e}"),
        }
    }
}

impl std::error::Error for BridgeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Directory(e) => Some(e),
            Self::Registry(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DirectoryError> for BridgeError {
    fn from(e: DirectoryError) -> Self {
        Self::Directory(e)
    }
}

impl From<RegistryError> for BridgeError {
    fn from(e: RegistryError) -> Self {
        Self::Registry(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_not_found_display() {
        let err = RegistryError::NotFound {
            name: "ADMIN".to_string(),
        };
        assert!(err.to_string().contains("ADMIN"));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn directory_conflict_display() {
        let err = DirectoryError::Conflict {
            constraint: "username".to_string(),
        };
        assert!(err.to_string().contains("uniqueness"));
        assert!(err.to_string().contains("username"));
    }

    #[test]
    fn bridge_missing_default_role_display() {
        let err = BridgeError::MissingDefaultRole {
            name: "ADMIN".to_string(),
        };
        assert!(err.to_string().contains("default role"));
        assert!(err.to_string().contains("ADMIN"));
    }

    #[test]
    fn bridge_error_wraps_sources() {
        use std::error::Error;

        let err = BridgeError::from(DirectoryError::Storage {
            details: "connection refused".to_string(),
        });
        assert!(err.source().is_some());
        assert!(err.to_string().contains("connection refused"));
    }
}
