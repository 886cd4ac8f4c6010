//! HTTP route handlers.

pub mod programs;
pub mod users;

use axum::Router;
use axum::routing::get;
use std::sync::Arc;

use crate::auth::AppState;

/// Builds the API router.
///
/// The identity bridge layer is mounted by the caller so it wraps every
/// route here.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users/me", get(users::me))
        .route("/users", get(users::list).post(users::create))
        .route(
            "/users/{username}",
            get(users::get_by_username).delete(users::delete_by_username),
        )
        .route("/programs", get(programs::list).post(programs::create))
        .route(
            "/programs/{id}",
            get(programs::get_by_id)
                .patch(programs::update)
                .delete(programs::delete),
        )
}
