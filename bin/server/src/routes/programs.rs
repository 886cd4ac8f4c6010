//! Program catalog routes.
//!
//! Any verified principal can read programs; writes are administrative.
//! Tag handling on create and update follows reconciliation semantics:
//! incoming references are matched against the shared catalog, and tags
//! created along the way are persisted to it.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use campus_catalog::{Course, Program, ProgramStore, TagInput, TagStore};
use campus_core::ProgramId;
use campus_identity::{AuthContext, UserDirectory, normalize_username};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::auth::{AppState, RequireAdmin, RequireAuth};
use crate::db::{PgProgramStore, PgTagStore};
use crate::error::ApiError;

/// API representation of a tag.
#[derive(Debug, Serialize)]
pub struct TagResponse {
    pub id: String,
    pub title: String,
    pub hex_code: Option<String>,
}

/// API representation of a course.
#[derive(Debug, Serialize)]
pub struct CourseResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

/// API representation of a program.
#[derive(Debug, Serialize)]
pub struct ProgramResponse {
    pub id: String,
    pub name: String,
    pub program_type: Option<String>,
    pub description: Option<String>,
    pub owner: String,
    pub tags: Vec<TagResponse>,
    pub courses: Vec<CourseResponse>,
}

impl From<&Program> for ProgramResponse {
    fn from(program: &Program) -> Self {
        Self {
            id: program.id().to_string(),
            name: program.name().to_string(),
            program_type: program.program_type().map(str::to_string),
            description: program.description().map(str::to_string),
            owner: program.owner().to_string(),
            tags: program
                .tags()
                .iter()
                .map(|t| TagResponse {
                    id: t.id().to_string(),
                    title: t.title().to_string(),
                    hex_code: t.hex_code().map(str::to_string),
                })
                .collect(),
            courses: program
                .courses()
                .iter()
                .map(|c| CourseResponse {
                    id: c.id().to_string(),
                    name: c.name().to_string(),
                    description: c.description().map(str::to_string),
                })
                .collect(),
        }
    }
}

/// An incoming course description.
#[derive(Debug, Deserialize)]
pub struct CourseInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Request body for creating a program.
#[derive(Debug, Deserialize)]
pub struct CreateProgram {
    pub name: String,
    #[serde(default)]
    pub program_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<TagInput>,
    #[serde(default)]
    pub courses: Vec<CourseInput>,
}

/// Request body for updating a program. Absent fields are left alone.
#[derive(Debug, Deserialize)]
pub struct UpdateProgram {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub program_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// When present, merges the given tag references into the attached
    /// set via reconciliation. Tags absent from the list stay attached.
    #[serde(default)]
    pub tags: Option<Vec<TagInput>>,
}

fn parse_program_id(raw: &str) -> Result<ProgramId, ApiError> {
    raw.parse().map_err(|_| ApiError::BadRequest {
        message: format!("invalid program id '{raw}'"),
    })
}

/// Lists all programs.
pub async fn list(
    State(state): State<Arc<AppState>>,
    RequireAuth(_context): RequireAuth,
) -> Result<Json<Vec<ProgramResponse>>, ApiError> {
    let programs = PgProgramStore::new(state.db_pool.clone()).find_all().await?;
    Ok(Json(programs.iter().map(ProgramResponse::from).collect()))
}

/// Looks up a program by ID.
pub async fn get_by_id(
    State(state): State<Arc<AppState>>,
    RequireAuth(_context): RequireAuth,
    Path(id): Path<String>,
) -> Result<Json<ProgramResponse>, ApiError> {
    let id = parse_program_id(&id)?;
    let program = PgProgramStore::new(state.db_pool.clone()).find_by_id(id).await?;
    Ok(Json(ProgramResponse::from(&program)))
}

/// Creates a program owned by the current principal.
pub async fn create(
    State(state): State<Arc<AppState>>,
    RequireAdmin(context): RequireAdmin,
    Json(body): Json<CreateProgram>,
) -> Result<(StatusCode, Json<ProgramResponse>), ApiError> {
    let owner = current_user_id(&state, &context).await?;

    let mut program = Program::new(body.name, owner);
    program.set_program_type(body.program_type);
    program.set_description(body.description);
    for course in body.courses {
        program.add_course(Course::new(course.name, course.description));
    }

    let tag_store = PgTagStore::new(state.db_pool.clone());
    let catalog = tag_store.find_all().await?;
    let created_tags = program.reconcile_tags(&body.tags, &catalog);
    if !created_tags.is_empty() {
        tag_store.save_all(&created_tags).await?;
    }

    let saved = PgProgramStore::new(state.db_pool.clone()).save(program).await?;
    Ok((StatusCode::CREATED, Json(ProgramResponse::from(&saved))))
}

/// Applies a partial update to a program.
pub async fn update(
    State(state): State<Arc<AppState>>,
    RequireAdmin(_context): RequireAdmin,
    Path(id): Path<String>,
    Json(body): Json<UpdateProgram>,
) -> Result<Json<ProgramResponse>, ApiError> {
    let id = parse_program_id(&id)?;
    let store = PgProgramStore::new(state.db_pool.clone());

    let mut program = store.find_by_id(id).await?;
    program.patch(body.name, body.program_type, body.description);

    if let Some(inputs) = body.tags {
        let tag_store = PgTagStore::new(state.db_pool.clone());
        let catalog = tag_store.find_all().await?;
        let created_tags = program.reconcile_tags(&inputs, &catalog);
        if !created_tags.is_empty() {
            tag_store.save_all(&created_tags).await?;
        }
    }

    let saved = store.save(program).await?;
    Ok(Json(ProgramResponse::from(&saved)))
}

/// Deletes a program and its courses.
pub async fn delete(
    State(state): State<Arc<AppState>>,
    RequireAdmin(_context): RequireAdmin,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_program_id(&id)?;
    PgProgramStore::new(state.db_pool.clone()).delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Resolves the current principal's user record ID.
async fn current_user_id(
    state: &AppState,
    context: &AuthContext,
) -> Result<campus_core::UserId, ApiError> {
    let Some(principal) = context.principal() else {
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

    Ok(user.id())
}
