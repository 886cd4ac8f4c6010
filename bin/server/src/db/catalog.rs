//! Postgres implementations of the catalog storage contracts.
//!
//! Programs own their courses (cascade on delete) and reference shared
//! tags through a join table.

use async_trait::async_trait;
use campus_catalog::{CatalogError, Course, Program, ProgramStore, Tag, TagStore};
use campus_core::{CourseId, ProgramId, TagId, UserId};
use sqlx::{FromRow, PgPool};
use std::str::FromStr;

/// Postgres error code for foreign key violations.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Row type for program queries.
#[derive(FromRow)]
struct ProgramRow {
    id: String,
    name: String,
    program_type: Option<String>,
    description: Option<String>,
    owner: String,
}

impl ProgramRow {
    fn try_into_program(
        self,
        tags: Vec<Tag>,
        courses: Vec<Course>,
    ) -> Result<Program, CatalogError> {
        let id = ProgramId::from_str(&self.id).map_err(|e| CatalogError::Storage {
            details: format!("invalid program id '{}': {e}", self.id),
        })?;
        let owner = UserId::from_str(&self.owner).map_err(|e| CatalogError::Storage {
            details: format!("invalid owner id '{}': {e}", self.owner),
        })?;
        Ok(Program::with_all_fields(
            id,
            self.name,
            self.program_type,
            self.description,
            owner,
            tags,
            courses,
        ))
    }
}

/// Row type for tag queries.
#[derive(FromRow)]
struct TagRow {
    id: String,
    title: String,
    hex_code: Option<String>,
}

impl TagRow {
    fn try_into_tag(self) -> Result<Tag, CatalogError> {
        let id = TagId::from_str(&self.id).map_err(|e| CatalogError::Storage {
            details: format!("invalid tag id '{}': {e}", self.id),
        })?;
        Ok(Tag::with_id(id, self.title, self.hex_code))
    }
}

/// Row type for course queries.
#[derive(FromRow)]
struct CourseRow {
    id: String,
    name: String,
    description: Option<String>,
}

impl CourseRow {
    fn try_into_course(self) -> Result<Course, CatalogError> {
        let id = CourseId::from_str(&self.id).map_err(|e| CatalogError::Storage {
            details: format!("invalid course id '{}': {e}", self.id),
        })?;
        Ok(Course::with_id(id, self.name, self.description))
    }
}

fn storage_error(e: sqlx::Error) -> CatalogError {
    CatalogError::Storage {
        details: e.to_string(),
    }
}

/// Postgres-backed program store.
pub struct PgProgramStore {
    pool: PgPool,
}

impl PgProgramStore {
    /// Creates a new store backed by the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_tags(&self, program_id: &str) -> Result<Vec<Tag>, CatalogError> {
        let rows: Vec<TagRow> = sqlx::query_as(
            r#"
            SELECT t.id, t.title, t.hex_code
            FROM program_tags pt
            JOIN tags t ON t.id = pt.tag_id
            WHERE pt.program_id = $1
            ORDER BY t.title
            "#,
        )
        .bind(program_id)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        rows.into_iter().map(TagRow::try_into_tag).collect()
    }

    async fn load_courses(&self, program_id: &str) -> Result<Vec<Course>, CatalogError> {
        let rows: Vec<CourseRow> = sqlx::query_as(
            r#"
            SELECT id, name, description
            FROM courses
            WHERE program_id = $1
            ORDER BY name
            "#,
        )
        .bind(program_id)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        rows.into_iter().map(CourseRow::try_into_course).collect()
    }

    async fn assemble(&self, row: ProgramRow) -> Result<Program, CatalogError> {
        let tags = self.load_tags(&row.id).await?;
        let courses = self.load_courses(&row.id).await?;
        row.try_into_program(tags, courses)
    }
}

#[async_trait]
impl ProgramStore for PgProgramStore {
    async fn find_all(&self) -> Result<Vec<Program>, CatalogError> {
        let rows: Vec<ProgramRow> = sqlx::query_as(
            r#"
            SELECT id, name, program_type, description, owner
            FROM programs
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        let mut programs = Vec::with_capacity(rows.len());
        for row in rows {
            programs.push(self.assemble(row).await?);
        }
        Ok(programs)
    }

    async fn find_by_id(&self, id: ProgramId) -> Result<Program, CatalogError> {
        let row: Option<ProgramRow> = sqlx::query_as(
            r#"
            SELECT id, name, program_type, description, owner
            FROM programs
            WHERE id = $1
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        let row = row.ok_or(CatalogError::ProgramNotFound { id })?;
        self.assemble(row).await
    }

    async fn save(&self, program: Program) -> Result<Program, CatalogError> {
        let mut tx = self.pool.begin().await.map_err(storage_error)?;
        let program_id = program.id().to_string();

        sqlx::query(
            r#"
            INSERT INTO programs (id, name, program_type, description, owner)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                program_type = EXCLUDED.program_type,
                description = EXCLUDED.description,
                owner = EXCLUDED.owner
            "#,
        )
        .bind(&program_id)
        .bind(program.name())
        .bind(program.program_type())
        .bind(program.description())
        .bind(program.owner().to_string())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db) = &e
                && db.code().as_deref() == Some(FOREIGN_KEY_VIOLATION)
            {
                return CatalogError::UserNotFound {
                    id: program.owner(),
                };
            }
            storage_error(e)
        })?;

        sqlx::query("DELETE FROM program_tags WHERE program_id = $1")
            .bind(&program_id)
            .execute(&mut *tx)
            .await
            .map_err(storage_error)?;

        for tag in program.tags() {
            sqlx::query(
                r#"
                INSERT INTO program_tags (program_id, tag_id)
                VALUES ($1, $2)
                "#,
            )
            .bind(&program_id)
            .bind(tag.id().to_string())
            .execute(&mut *tx)
            .await
            .map_err(storage_error)?;
        }

        sqlx::query("DELETE FROM courses WHERE program_id = $1")
            .bind(&program_id)
            .execute(&mut *tx)
            .await
            .map_err(storage_error)?;

        for course in program.courses() {
            sqlx::query(
                r#"
                INSERT INTO courses (id, program_id, name, description)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(course.id().to_string())
            .bind(&program_id)
            .bind(course.name())
            .bind(course.description())
            .execute(&mut *tx)
            .await
            .map_err(storage_error)?;
        }

        tx.commit().await.map_err(storage_error)?;
        Ok(program)
    }

    async fn delete_by_id(&self, id: ProgramId) -> Result<(), CatalogError> {
        let result = sqlx::query("DELETE FROM programs WHERE id = $1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::ProgramNotFound { id });
        }
        Ok(())
    }
}

/// Postgres-backed tag store.
pub struct PgTagStore {
    pool: PgPool,
}

impl PgTagStore {
    /// Creates a new store backed by the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TagStore for PgTagStore {
    async fn find_all(&self) -> Result<Vec<Tag>, CatalogError> {
        let rows: Vec<TagRow> = sqlx::query_as(
            r#"
            SELECT id, title, hex_code
            FROM tags
            ORDER BY title
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        rows.into_iter().map(TagRow::try_into_tag).collect()
    }

    async fn save_all(&self, tags: &[Tag]) -> Result<(), CatalogError> {
        let mut tx = self.pool.begin().await.map_err(storage_error)?;

        for tag in tags {
            sqlx::query(
                r#"
                INSERT INTO tags (id, title, hex_code)
                VALUES ($1, $2, $3)
                ON CONFLICT (id) DO UPDATE SET
                    title = EXCLUDED.title,
                    hex_code = EXCLUDED.hex_code
                "#,
            )
            .bind(tag.id().to_string())
            .bind(tag.title())
            .bind(tag.hex_code())
            .execute(&mut *tx)
            .await
            .map_err(storage_error)?;
        }

        tx.commit().await.map_err(storage_error)?;
        Ok(())
    }
}
