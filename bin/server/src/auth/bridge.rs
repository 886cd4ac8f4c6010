//! Per-request identity bridge layer.
//!
//! Runs after the proxy's verification and before any handler: builds
//! the inbound context from headers, reconciles it against the local
//! directory, and stores the re-issued context in the request
//! extensions for the extractors to pick up.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;

use super::AppState;
use crate::error::ApiError;

/// Bridges the inbound principal and attaches the resulting
/// [`AuthContext`](campus_identity::AuthContext) to the request.
///
/// Mount with `axum::middleware::from_fn_with_state`.
///
/// # Errors
///
/// Fails with a 500 response when the directory or registry is
/// unavailable, or when the configured default role is missing.
pub async fn bridge_layer(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let incoming = super::principal::context_from_headers(request.headers(), &state.identity);

    let context = campus_identity::bridge(
        incoming,
        &state.user_directory(),
        &state.role_registry(),
        &state.identity.default_role,
    )
    .await?;

    request.extensions_mut().insert(context);
    Ok(next.run(request).await)
}
