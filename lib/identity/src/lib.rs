//! Identity bridging and role-priority authorization for campus.
//!
//! This crate provides:
//! - User identity records (`User`) with normalized usernames
//! - Role reference data (`Role`, `RoleType`) and grants (`RoleAssignment`)
//! - Pure role-priority resolution and authority-token derivation
//! - The identity bridge that reconciles externally verified principals
//!   against the local directory once per request
//!
//! # Identity Model
//!
//! Identity verification is delegated to an external OIDC provider;
//! this crate trusts the verified principal name it receives. Local
//! authorization is driven entirely by the user's role assignments:
//! the priority role type decides coarse visibility, while the full
//! authority list (`ROLE_<NAME>` tokens) travels on the authentication
//! context.
//!
//! # Example
//!
//! ```
//! use campus_identity::{Role, RoleType, User};
//!
//! let mut user = User::new("Ada.Lovelace", "ada@example.com".to_string());
//! assert_eq!(user.username(), "ada.lovelace");
//!
//! user.grant_role(Role::new("TEACHER".to_string(), Some(RoleType::Teacher)));
//! user.grant_role(Role::new("STUDENT".to_string(), Some(RoleType::Student)));
//!
//! assert_eq!(user.priority_role_type(), Some(RoleType::Teacher));
//! let tokens: Vec<_> = user.authorities().iter().map(|a| a.to_string()).collect();
//! assert!(tokens.contains(&"ROLE_TEACHER".to_string()));
//! assert!(tokens.contains(&"ROLE_STUDENT".to_string()));
//! ```

pub mod authority;
pub mod bridge;
pub mod context;
pub mod directory;
pub mod error;
pub mod role;
pub mod user;

// Re-export main types at crate root
pub use authority::{Authority, authorities, priority_role_type};
pub use bridge::bridge;
pub use context::AuthContext;
pub use directory::{RoleRegistry, UserDirectory};
pub use error::{BridgeError, DirectoryError, RegistryError};
pub use role::{Role, RoleAssignment, RoleType};
pub use user::{User, normalize_username};
