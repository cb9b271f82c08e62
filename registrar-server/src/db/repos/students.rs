//! Student repository
//!
//! Students carry a unique aadhar number and an optional proctor
//! reference. The enriched listing embeds the proctor via LEFT JOIN in a
//! single query.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool, Row};
use uuid::Uuid;

use crate::models::AadharNumber;

use super::{DbError, Professor};

/// Student record from database
#[derive(Debug, Clone, FromRow)]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub aadhar_number: String,
    pub proctor_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Student with the proctoring professor embedded (None when unassigned)
#[derive(Debug, Clone)]
pub struct StudentWithProctor {
    pub student: Student,
    pub proctor: Option<Professor>,
}

/// Student repository
pub struct StudentRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> StudentRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all students, oldest first.
    pub async fn list(&self) -> Result<Vec<Student>, DbError> {
        let students: Vec<Student> = sqlx::query_as(
            r#"
            SELECT id, name, date_of_birth, aadhar_number, proctor_id, created_at
            FROM students
            ORDER BY created_at
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(students)
    }

    /// List all students with the proctoring professor embedded.
    ///
    /// Single LEFT JOIN query; no per-student proctor lookup.
    pub async fn list_enriched(&self) -> Result<Vec<StudentWithProctor>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT
                s.id, s.name, s.date_of_birth, s.aadhar_number, s.proctor_id, s.created_at,
                p.id AS proctor_pk,
                p.name AS proctor_name,
                p.seniority AS proctor_seniority,
                p.aadhar_number AS proctor_aadhar_number,
                p.created_at AS proctor_created_at
            FROM students s
            LEFT JOIN professors p ON p.id = s.proctor_id
            ORDER BY s.created_at
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        let enriched = rows
            .into_iter()
            .map(|row| {
                // proctor_* columns are NULL exactly when proctor_id is NULL
                let proctor = row
                    .get::<Option<Uuid>, _>("proctor_pk")
                    .map(|id| Professor {
                        id,
                        name: row.get("proctor_name"),
                        seniority: row.get("proctor_seniority"),
                        aadhar_number: row.get("proctor_aadhar_number"),
                        created_at: row.get("proctor_created_at"),
                    });

                StudentWithProctor {
                    student: Student {
                        id: row.get("id"),
                        name: row.get("name"),
                        date_of_birth: row.get("date_of_birth"),
                        aadhar_number: row.get("aadhar_number"),
                        proctor_id: row.get("proctor_id"),
                        created_at: row.get("created_at"),
                    },
                    proctor,
                }
            })
            .collect();

        Ok(enriched)
    }

    /// List students proctored by the given professor.
    pub async fn list_by_proctor(&self, professor_id: Uuid) -> Result<Vec<Student>, DbError> {
        let students: Vec<Student> = sqlx::query_as(
            r#"
            SELECT id, name, date_of_birth, aadhar_number, proctor_id, created_at
            FROM students
            WHERE proctor_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(professor_id)
        .fetch_all(self.pool)
        .await?;

        Ok(students)
    }

    /// Get a single student by id.
    pub async fn get(&self, id: Uuid) -> Result<Student, DbError> {
        let student: Option<Student> = sqlx::query_as(
            r#"
            SELECT id, name, date_of_birth, aadhar_number, proctor_id, created_at
            FROM students
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        student.ok_or_else(|| DbError::NotFound {
            resource: "student",
            id: id.to_string(),
        })
    }

    /// Create a student.
    ///
    /// The unique index on aadhar_number is the duplicate guard; a
    /// concurrent duplicate create surfaces as `DbError::Conflict`. An
    /// unknown proctor_id surfaces as `DbError::ForeignKey`.
    pub async fn create(
        &self,
        name: &str,
        date_of_birth: NaiveDate,
        aadhar: AadharNumber,
        proctor_id: Option<Uuid>,
    ) -> Result<Student, DbError> {
        let student: Student = sqlx::query_as(
            r#"
            INSERT INTO students (name, date_of_birth, aadhar_number, proctor_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, date_of_birth, aadhar_number, proctor_id, created_at
            "#,
        )
        .bind(name)
        .bind(date_of_birth)
        .bind(aadhar.as_str())
        .bind(proctor_id)
        .fetch_one(self.pool)
        .await?;

        Ok(student)
    }

    /// Overwrite every mutable field of a student.
    ///
    /// Full replace, not merge: a None proctor_id clears the assignment.
    pub async fn update(
        &self,
        id: Uuid,
        name: &str,
        date_of_birth: NaiveDate,
        aadhar: AadharNumber,
        proctor_id: Option<Uuid>,
    ) -> Result<Student, DbError> {
        let student: Option<Student> = sqlx::query_as(
            r#"
            UPDATE students
            SET name = $2, date_of_birth = $3, aadhar_number = $4, proctor_id = $5
            WHERE id = $1
            RETURNING id, name, date_of_birth, aadhar_number, proctor_id, created_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(date_of_birth)
        .bind(aadhar.as_str())
        .bind(proctor_id)
        .fetch_optional(self.pool)
        .await?;

        student.ok_or_else(|| DbError::NotFound {
            resource: "student",
            id: id.to_string(),
        })
    }

    /// Set the student's proctor.
    pub async fn assign_proctor(
        &self,
        student_id: Uuid,
        professor_id: Uuid,
    ) -> Result<Student, DbError> {
        let student: Option<Student> = sqlx::query_as(
            r#"
            UPDATE students
            SET proctor_id = $2
            WHERE id = $1
            RETURNING id, name, date_of_birth, aadhar_number, proctor_id, created_at
            "#,
        )
        .bind(student_id)
        .bind(professor_id)
        .fetch_optional(self.pool)
        .await?;

        student.ok_or_else(|| DbError::NotFound {
            resource: "student",
            id: student_id.to_string(),
        })
    }

    /// Delete a student, returning the deleted record.
    ///
    /// The membership row, if any, goes with it (ON DELETE CASCADE).
    pub async fn delete(&self, id: Uuid) -> Result<Student, DbError> {
        let student: Option<Student> = sqlx::query_as(
            r#"
            DELETE FROM students
            WHERE id = $1
            RETURNING id, name, date_of_birth, aadhar_number, proctor_id, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        student.ok_or_else(|| DbError::NotFound {
            resource: "student",
            id: id.to_string(),
        })
    }
}
