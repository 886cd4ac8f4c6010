//! API error type and response mapping.
//!
//! Internal detail stays in the logs; responses carry only user-safe
//! messages.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use campus_catalog::CatalogError;
use campus_identity::{BridgeError, DirectoryError, RegistryError};
use std::fmt;

/// Errors surfaced by API handlers.
#[derive(Debug)]
pub enum ApiError {
    /// The request was malformed.
    BadRequest { message: String },
    /// The requested entity does not exist.
    NotFound { message: String },
    /// A uniqueness constraint was violated.
    Conflict { message: String },
    /// Anything the client cannot act on.
    Internal { details: String },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadRequest { message } => write!(f, "bad request: {message}"),
            Self::NotFound { message } => write!(f, "not found: {message}"),
            Self::Conflict { message } => write!(f, "conflict: {message}"),
            Self::Internal { details } => write!(f, "internal error: {details}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            Self::NotFound { message } => (StatusCode::NOT_FOUND, message),
            Self::Conflict { message } => (StatusCode::CONFLICT, message),
            Self::Internal { details } => {
                tracing::error!(details = %details, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, message).into_response()
    }
}

impl From<DirectoryError> for ApiError {
    fn from(e: DirectoryError) -> Self {
        match e {
            DirectoryError::Conflict { constraint } => Self::Conflict {
                message: format!("duplicate value for {constraint}"),
            },
            DirectoryError::NotFound { id } => Self::NotFound {
                message: format!("user '{id}' not found"),
            },
            DirectoryError::Storage { details } => Self::Internal { details },
        }
    }
}

impl From<RegistryError> for ApiError {
    fn from(e: RegistryError) -> Self {
        match e {
            RegistryError::NotFound { name } => Self::BadRequest {
                message: format!("unknown role '{name}'"),
            },
            RegistryError::Storage { details } => Self::Internal { details },
        }
    }
}

impl From<BridgeError> for ApiError {
    fn from(e: BridgeError) -> Self {
        // Bridging failures are never the client's fault; everything
        // surfaces as a generic server error.
        Self::Internal {
            details: e.to_string(),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::ProgramNotFound { id } => Self::NotFound {
                message: format!("program '{id}' not found"),
            },
            CatalogError::UserNotFound { id } => Self::NotFound {
                message: format!("user '{id}' not found"),
            },
            CatalogError::Storage { details } => Self::Internal { details },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_maps_from_directory_error() {
        let err = ApiError::from(DirectoryError::Conflict {
            constraint: "username".to_string(),
        });
        match err {
            ApiError::Conflict { message } => assert!(message.contains("username")),
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[test]
    fn bridge_errors_stay_internal() {
        let err = ApiError::from(BridgeError::MissingDefaultRole {
            name: "ADMIN".to_string(),
        });
        assert!(matches!(err, ApiError::Internal { .. }));
    }
}
