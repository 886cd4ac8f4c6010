//! User management routes.
//!
//! Reading and managing other users is administrative; `/users/me` is
//! available to any verified principal.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use campus_identity::{
    AuthContext, RoleRegistry, RoleType, User, UserDirectory, normalize_username,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::auth::{AppState, RequireAdmin, RequireAuth};
use crate::error::ApiError;

/// API representation of a user record.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    /// Names of the roles this user holds.
    pub roles: Vec<String>,
    /// The single highest-priority classification, if any role carries one.
    pub priority_role_type: Option<RoleType>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            username: user.username().to_string(),
            email: user.email().to_string(),
            first_name: user.first_name().map(str::to_string),
            last_name: user.last_name().map(str::to_string),
            phone: user.phone().map(str::to_string),
            roles: user
                .roles()
                .iter()
                .map(|a| a.role().name().to_string())
                .collect(),
            priority_role_type: user.priority_role_type(),
        }
    }
}

/// Request body for creating a user.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// Names of roles to grant. Unknown names reject the request.
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Lists all users.
pub async fn list(
    State(state): State<Arc<AppState>>,
    RequireAdmin(_context): RequireAdmin,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.user_directory().find_all().await?;
    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// Returns the record backing the current principal.
pub async fn me(
    State(state): State<Arc<AppState>>,
    RequireAuth(context): RequireAuth,
) -> Result<Json<UserResponse>, ApiError> {
    let AuthContext::Verified { principal, .. } = &context else {
        // RequireAuth never passes an anonymous context through.
        return Err(ApiError::Internal {
            details: "verified extractor produced anonymous context".to_string(),
        });
    };

    let username = normalize_username(principal);
    let user = state
        .user_directory()
        .find_by_username(&username)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            message: format!("user '{username}' not found"),
        })?;

    Ok(Json(UserResponse::from(&user)))
}

/// Creates a user with an explicit set of role grants.
pub async fn create(
    State(state): State<Arc<AppState>>,
    RequireAdmin(_context): RequireAdmin,
    Json(body): Json<CreateUser>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let registry = state.role_registry();

    let mut user = User::new(&body.username, body.email);
    user.set_first_name(body.first_name);
    user.set_last_name(body.last_name);
    user.set_phone(body.phone);

    for name in &body.roles {
        let role = registry.find_by_name(name).await?;
        user.grant_role(role);
    }

    let created = state.user_directory().save(user).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(&created))))
}

/// Looks up a user by username.
pub async fn get_by_username(
    State(state): State<Arc<AppState>>,
    RequireAdmin(_context): RequireAdmin,
    Path(username): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let username = normalize_username(&username);
    let user = state
        .user_directory()
        .find_by_username(&username)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            message: format!("user '{username}' not found"),
        })?;

    Ok(Json(UserResponse::from(&user)))
}

/// Deletes a user and all of its role assignments.
pub async fn delete_by_username(
    State(state): State<Arc<AppState>>,
    RequireAdmin(_context): RequireAdmin,
    Path(username): Path<String>,
) -> Result<StatusCode, ApiError> {
    let username = normalize_username(&username);
    let directory = state.user_directory();

    let user = directory
        .find_by_username(&username)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            message: format!("user '{username}' not found"),
        })?;

    directory.delete_by_id(user.id()).await?;
    Ok(StatusCode::NO_CONTENT)
}
