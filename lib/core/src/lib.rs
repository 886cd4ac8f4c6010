//! Core domain types and utilities for the campus platform.
//!
//! This crate provides the foundational types, error handling, and shared
//! utilities used throughout the campus education-platform backend.

pub mod error;
pub mod id;

pub use error::Result;
pub use id::{CourseId, ProgramId, RoleId, TagId, UserId};
