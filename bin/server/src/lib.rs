//! HTTP API server for the campus education platform.
//!
//! Wires the identity bridge and the catalog stores to Postgres and
//! exposes them over an Axum router. Identity verification is delegated
//! to an authenticating reverse proxy; see [`auth`] for the trust model.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod routes;
