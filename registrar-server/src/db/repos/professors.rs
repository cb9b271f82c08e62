//! Professor repository
//!
//! Professors are keyed by the primary id everywhere (lookup, update,
//! delete). Deleting a professor nullifies proctor_id on their students
//! at the schema level.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::models::AadharNumber;

use super::DbError;

/// Professor record from database
#[derive(Debug, Clone, FromRow)]
pub struct Professor {
    pub id: Uuid,
    pub name: String,
    pub seniority: i32,
    pub aadhar_number: String,
    pub created_at: DateTime<Utc>,
}

/// Professor repository
pub struct ProfessorRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ProfessorRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all professors, oldest first.
    pub async fn list(&self) -> Result<Vec<Professor>, DbError> {
        let professors: Vec<Professor> = sqlx::query_as(
            r#"
            SELECT id, name, seniority, aadhar_number, created_at
            FROM professors
            ORDER BY created_at
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(professors)
    }

    /// Get a single professor by id.
    pub async fn get(&self, id: Uuid) -> Result<Professor, DbError> {
        let professor: Option<Professor> = sqlx::query_as(
            r#"
            SELECT id, name, seniority, aadhar_number, created_at
            FROM professors
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        professor.ok_or_else(|| DbError::NotFound {
            resource: "professor",
            id: id.to_string(),
        })
    }

    /// Create a professor.
    ///
    /// Duplicate aadhar numbers are rejected by the unique index and
    /// surface as `DbError::Conflict`.
    pub async fn create(
        &self,
        name: &str,
        seniority: i32,
        aadhar: AadharNumber,
    ) -> Result<Professor, DbError> {
        let professor: Professor = sqlx::query_as(
            r#"
            INSERT INTO professors (name, seniority, aadhar_number)
            VALUES ($1, $2, $3)
            RETURNING id, name, seniority, aadhar_number, created_at
            "#,
        )
        .bind(name)
        .bind(seniority)
        .bind(aadhar.as_str())
        .fetch_one(self.pool)
        .await?;

        Ok(professor)
    }

    /// Overwrite every mutable field of a professor.
    pub async fn update(
        &self,
        id: Uuid,
        name: &str,
        seniority: i32,
        aadhar: AadharNumber,
    ) -> Result<Professor, DbError> {
        let professor: Option<Professor> = sqlx::query_as(
            r#"
            UPDATE professors
            SET name = $2, seniority = $3, aadhar_number = $4
            WHERE id = $1
            RETURNING id, name, seniority, aadhar_number, created_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(seniority)
        .bind(aadhar.as_str())
        .fetch_optional(self.pool)
        .await?;

        professor.ok_or_else(|| DbError::NotFound {
            resource: "professor",
            id: id.to_string(),
        })
    }

    /// Delete a professor, returning the deleted record.
    ///
    /// Proctored students are kept; their proctor_id becomes NULL.
    pub async fn delete(&self, id: Uuid) -> Result<Professor, DbError> {
        let professor: Option<Professor> = sqlx::query_as(
            r#"
            DELETE FROM professors
            WHERE id = $1
            RETURNING id, name, seniority, aadhar_number, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        professor.ok_or_else(|| DbError::NotFound {
            resource: "professor",
            id: id.to_string(),
        })
    }
}
