//! Library membership repository
//!
//! One membership per student, enforced by the unique index on
//! student_id. All operations key on the owning student.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::DbError;

/// Library membership record from database
#[derive(Debug, Clone, FromRow)]
pub struct LibraryMembership {
    pub id: Uuid,
    pub student_id: Uuid,
    pub issue_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Library membership repository
pub struct MembershipRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> MembershipRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get the membership for a student.
    pub async fn get_for_student(&self, student_id: Uuid) -> Result<LibraryMembership, DbError> {
        let membership: Option<LibraryMembership> = sqlx::query_as(
            r#"
            SELECT id, student_id, issue_date, expiry_date, created_at
            FROM library_memberships
            WHERE student_id = $1
            "#,
        )
        .bind(student_id)
        .fetch_optional(self.pool)
        .await?;

        membership.ok_or_else(|| DbError::NotFound {
            resource: "library membership",
            id: student_id.to_string(),
        })
    }

    /// Create a membership for a student.
    ///
    /// A second membership for the same student violates the unique index
    /// and surfaces as `DbError::Conflict`.
    pub async fn create(
        &self,
        student_id: Uuid,
        issue_date: NaiveDate,
        expiry_date: NaiveDate,
    ) -> Result<LibraryMembership, DbError> {
        let membership: LibraryMembership = sqlx::query_as(
            r#"
            INSERT INTO library_memberships (student_id, issue_date, expiry_date)
            VALUES ($1, $2, $3)
            RETURNING id, student_id, issue_date, expiry_date, created_at
            "#,
        )
        .bind(student_id)
        .bind(issue_date)
        .bind(expiry_date)
        .fetch_one(self.pool)
        .await?;

        Ok(membership)
    }

    /// Overwrite both dates of a student's membership.
    pub async fn update_for_student(
        &self,
        student_id: Uuid,
        issue_date: NaiveDate,
        expiry_date: NaiveDate,
    ) -> Result<LibraryMembership, DbError> {
        let membership: Option<LibraryMembership> = sqlx::query_as(
            r#"
            UPDATE library_memberships
            SET issue_date = $2, expiry_date = $3
            WHERE student_id = $1
            RETURNING id, student_id, issue_date, expiry_date, created_at
            "#,
        )
        .bind(student_id)
        .bind(issue_date)
        .bind(expiry_date)
        .fetch_optional(self.pool)
        .await?;

        membership.ok_or_else(|| DbError::NotFound {
            resource: "library membership",
            id: student_id.to_string(),
        })
    }

    /// Delete a student's membership, returning the deleted record.
    pub async fn delete_for_student(
        &self,
        student_id: Uuid,
    ) -> Result<LibraryMembership, DbError> {
        let membership: Option<LibraryMembership> = sqlx::query_as(
            r#"
            DELETE FROM library_memberships
            WHERE student_id = $1
            RETURNING id, student_id, issue_date, expiry_date, created_at
            "#,
        )
        .bind(student_id)
        .fetch_optional(self.pool)
        .await?;

        membership.ok_or_else(|| DbError::NotFound {
            resource: "library membership",
            id: student_id.to_string(),
        })
    }
}
