//! Program, course, and tag catalog for campus.
//!
//! These are the domain collaborators that surround the identity core:
//! programs of study owned by users, the courses they contain, and a
//! shared catalog of tags with reconciliation semantics on save.

pub mod course;
pub mod error;
pub mod program;
pub mod store;
pub mod tag;

// Re-export main types at crate root
pub use course::Course;
pub use error::CatalogError;
pub use program::Program;
pub use store::{ProgramStore, TagStore};
pub use tag::{Tag, TagInput};
