//! Student endpoints
//!
//! PATCH is a full-field overwrite, not a merge: every mutable field is
//! written from the request body, and an omitted proctorId clears the
//! proctor assignment.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    routing::patch,
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::repos::{Student, StudentRepo, StudentWithProctor};
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::AadharNumber;

use super::professors::ProfessorResponse;

/// Create/replace student request (full-field body)
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPayload {
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub aadhar_number: String,
    /// Absent means unassigned; on PATCH this clears any prior proctor.
    #[serde(default)]
    pub proctor_id: Option<Uuid>,
}

/// Student response
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    pub id: Uuid,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub aadhar_number: String,
    pub proctor_id: Option<Uuid>,
    pub created_at: String,
}

impl From<Student> for StudentResponse {
    fn from(s: Student) -> Self {
        Self {
            id: s.id,
            name: s.name,
            date_of_birth: s.date_of_birth,
            aadhar_number: s.aadhar_number,
            proctor_id: s.proctor_id,
            created_at: s.created_at.to_rfc3339(),
        }
    }
}

/// Student response with the proctoring professor embedded
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedStudentResponse {
    #[serde(flatten)]
    pub student: StudentResponse,
    pub proctor: Option<ProfessorResponse>,
}

impl From<StudentWithProctor> for EnrichedStudentResponse {
    fn from(s: StudentWithProctor) -> Self {
        Self {
            student: StudentResponse::from(s.student),
            proctor: s.proctor.map(ProfessorResponse::from),
        }
    }
}

/// GET /students - list all students
async fn list_students(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StudentResponse>>, ApiError> {
    let students = StudentRepo::new(&state.pool).list().await?;
    Ok(Json(students.into_iter().map(StudentResponse::from).collect()))
}

/// GET /students/enriched - list all students with their proctor embedded
async fn list_enriched(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<EnrichedStudentResponse>>, ApiError> {
    let students = StudentRepo::new(&state.pool).list_enriched().await?;
    Ok(Json(
        students
            .into_iter()
            .map(EnrichedStudentResponse::from)
            .collect(),
    ))
}

/// POST /students - create a new student
async fn create_student(
    State(state): State<Arc<AppState>>,
    Json(req): Json<StudentPayload>,
) -> Result<Json<StudentResponse>, ApiError> {
    let aadhar = AadharNumber::new(&req.aadhar_number)?;

    // The unique index guards against duplicate aadhar numbers; the FK
    // guards against a dangling proctorId. Both map to 400 responses.
    let student = StudentRepo::new(&state.pool)
        .create(&req.name, req.date_of_birth, aadhar, req.proctor_id)
        .await?;

    Ok(Json(StudentResponse::from(student)))
}

/// PATCH /students/{studentId} - overwrite all fields of a student
async fn update_student(
    State(state): State<Arc<AppState>>,
    Path(student_id): Path<Uuid>,
    Json(req): Json<StudentPayload>,
) -> Result<Json<StudentResponse>, ApiError> {
    let aadhar = AadharNumber::new(&req.aadhar_number)?;

    let student = StudentRepo::new(&state.pool)
        .update(
            student_id,
            &req.name,
            req.date_of_birth,
            aadhar,
            req.proctor_id,
        )
        .await?;

    Ok(Json(StudentResponse::from(student)))
}

/// DELETE /students/{studentId} - delete a student, returning the record
async fn delete_student(
    State(state): State<Arc<AppState>>,
    Path(student_id): Path<Uuid>,
) -> Result<Json<StudentResponse>, ApiError> {
    let student = StudentRepo::new(&state.pool).delete(student_id).await?;
    Ok(Json(StudentResponse::from(student)))
}

/// Student routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/students", get(list_students).post(create_student))
        .route("/students/enriched", get(list_enriched))
        .route(
            "/students/{student_id}",
            patch(update_student).delete(delete_student),
        )
}
