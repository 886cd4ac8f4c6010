//! Postgres-backed storage for the catalog.

pub mod catalog;

pub use catalog::{PgProgramStore, PgTagStore};
