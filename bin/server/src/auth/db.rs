//! Postgres-backed user directory and role registry.
//!
//! The `user_roles` join table is owned by the user record: `save`
//! rewrites it inside the same transaction as the user row, and the
//! foreign keys cascade on user deletion.

use async_trait::async_trait;
use campus_core::{RoleId, UserId};
use campus_identity::{
    DirectoryError, RegistryError, Role, RoleAssignment, RoleType, User, UserDirectory,
    RoleRegistry,
};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::str::FromStr;

/// Postgres error code for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// Row type for user queries.
#[derive(FromRow)]
struct UserRow {
    id: String,
    username: String,
    email: String,
    first_name: Option<String>,
    last_name: Option<String>,
    phone: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn try_into_user(self, roles: Vec<RoleAssignment>) -> Result<User, DirectoryError> {
        let id = UserId::from_str(&self.id).map_err(|e| DirectoryError::Storage {
            details: format!("invalid user id '{}': {e}", self.id),
        })?;
        Ok(User::with_all_fields(
            id,
            &self.username,
            self.email,
            self.first_name,
            self.last_name,
            self.phone,
            roles,
            self.created_at,
            self.updated_at,
        ))
    }
}

/// Row type for role assignment queries.
#[derive(FromRow)]
struct AssignmentRow {
    role_id: String,
    name: String,
    role_type: Option<String>,
    granted_at: DateTime<Utc>,
}

impl AssignmentRow {
    fn try_into_assignment(self) -> Result<RoleAssignment, DirectoryError> {
        let role = parse_role(&self.role_id, self.name, self.role_type.as_deref())
            .map_err(|details| DirectoryError::Storage { details })?;
        Ok(RoleAssignment::with_granted_at(role, self.granted_at))
    }
}

/// Row type for role definition queries.
#[derive(FromRow)]
struct RoleRow {
    id: String,
    name: String,
    role_type: Option<String>,
}

fn parse_role(id: &str, name: String, role_type: Option<&str>) -> Result<Role, String> {
    let id = RoleId::from_str(id).map_err(|e| format!("invalid role id '{id}': {e}"))?;
    let role_type = role_type
        .map(RoleType::from_str)
        .transpose()
        .map_err(|e| format!("invalid role type for '{name}': {e}"))?;
    Ok(Role::with_id(id, name, role_type))
}

fn map_directory_error(e: sqlx::Error) -> DirectoryError {
    if let sqlx::Error::Database(db) = &e
        && db.code().as_deref() == Some(UNIQUE_VIOLATION)
    {
        return DirectoryError::Conflict {
            constraint: db.constraint().unwrap_or("unique").to_string(),
        };
    }
    DirectoryError::Storage {
        details: e.to_string(),
    }
}

/// Postgres-backed user directory.
pub struct PgUserDirectory {
    pool: PgPool,
}

impl PgUserDirectory {
    /// Creates a new directory backed by the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lists all users with their role assignments.
    ///
    /// Administrative listing lives outside the [`UserDirectory`]
    /// contract; the bridge never needs it.
    pub async fn find_all(&self) -> Result<Vec<User>, DirectoryError> {
        let rows: Vec<UserRow> = sqlx::query_as(
            r#"
            SELECT id, username, email, first_name, last_name, phone, created_at, updated_at
            FROM users
            ORDER BY username
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_directory_error)?;

        let mut users = Vec::with_capacity(rows.len());
        for row in rows {
            let roles = self.load_assignments(&row.id).await?;
            users.push(row.try_into_user(roles)?);
        }
        Ok(users)
    }

    async fn load_assignments(&self, user_id: &str) -> Result<Vec<RoleAssignment>, DirectoryError> {
        let rows: Vec<AssignmentRow> = sqlx::query_as(
            r#"
            SELECT r.id AS role_id, r.name, r.role_type, ur.granted_at
            FROM user_roles ur
            JOIN roles r ON r.id = ur.role_id
            WHERE ur.user_id = $1
            ORDER BY ur.granted_at
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_directory_error)?;

        rows.into_iter()
            .map(AssignmentRow::try_into_assignment)
            .collect()
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DirectoryError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, username, email, first_name, last_name, phone, created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_directory_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let roles = self.load_assignments(&row.id).await?;
        Ok(Some(row.try_into_user(roles)?))
    }

    async fn save(&self, user: User) -> Result<User, DirectoryError> {
        let mut tx = self.pool.begin().await.map_err(map_directory_error)?;
        let user_id = user.id().to_string();

        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, first_name, last_name, phone, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO UPDATE SET
                username = EXCLUDED.username,
                email = EXCLUDED.email,
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                phone = EXCLUDED.phone,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(&user_id)
        .bind(user.username())
        .bind(user.email())
        .bind(user.first_name())
        .bind(user.last_name())
        .bind(user.phone())
        .bind(user.created_at())
        .bind(user.updated_at())
        .execute(&mut *tx)
        .await
        .map_err(map_directory_error)?;

        // The user owns its assignments; rewrite them wholesale.
        sqlx::query("DELETE FROM user_roles WHERE user_id = $1")
            .bind(&user_id)
            .execute(&mut *tx)
            .await
            .map_err(map_directory_error)?;

        for assignment in user.roles() {
            sqlx::query(
                r#"
                INSERT INTO user_roles (user_id, role_id, granted_at)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(&user_id)
            .bind(assignment.role().id().to_string())
            .bind(assignment.granted_at())
            .execute(&mut *tx)
            .await
            .map_err(map_directory_error)?;
        }

        tx.commit().await.map_err(map_directory_error)?;
        Ok(user)
    }

    async fn delete_by_id(&self, id: UserId) -> Result<(), DirectoryError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(map_directory_error)?;

        if result.rows_affected() == 0 {
            return Err(DirectoryError::NotFound { id: id.to_string() });
        }
        Ok(())
    }
}

/// Postgres-backed role registry.
pub struct PgRoleRegistry {
    pool: PgPool,
}

impl PgRoleRegistry {
    /// Creates a new registry backed by the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleRegistry for PgRoleRegistry {
    async fn find_by_name(&self, name: &str) -> Result<Role, RegistryError> {
        let row: Option<RoleRow> = sqlx::query_as(
            r#"
            SELECT id, name, role_type
            FROM roles
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RegistryError::Storage {
            details: e.to_string(),
        })?;

        let row = row.ok_or_else(|| RegistryError::NotFound {
            name: name.to_string(),
        })?;

        parse_role(&row.id, row.name, row.role_type.as_deref())
            .map_err(|details| RegistryError::Storage { details })
    }
}
