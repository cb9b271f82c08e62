//! Proctorship endpoints
//!
//! A proctorship is held on the student row (proctor_id); these routes
//! view and assign it from the professor's side.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::db::repos::{ProfessorRepo, StudentRepo};
use crate::http::error::ApiError;
use crate::http::server::AppState;

use super::students::StudentResponse;

/// Assign proctorship request
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignProctorshipRequest {
    pub student_id: Uuid,
}

/// GET /professors/{professorId}/proctorships - students proctored by this professor
///
/// An empty list is not an error; an unknown professor is.
async fn list_proctorships(
    State(state): State<Arc<AppState>>,
    Path(professor_id): Path<Uuid>,
) -> Result<Json<Vec<StudentResponse>>, ApiError> {
    ProfessorRepo::new(&state.pool).get(professor_id).await?;

    let students = StudentRepo::new(&state.pool)
        .list_by_proctor(professor_id)
        .await?;

    Ok(Json(students.into_iter().map(StudentResponse::from).collect()))
}

/// POST /professors/{professorId}/proctorships - assign a student to this professor
///
/// Both sides are checked: an unknown professor and an unknown student
/// each yield their own not-found response.
async fn assign_proctorship(
    State(state): State<Arc<AppState>>,
    Path(professor_id): Path<Uuid>,
    Json(req): Json<AssignProctorshipRequest>,
) -> Result<Json<StudentResponse>, ApiError> {
    ProfessorRepo::new(&state.pool).get(professor_id).await?;

    let student = StudentRepo::new(&state.pool)
        .assign_proctor(req.student_id, professor_id)
        .await?;

    Ok(Json(StudentResponse::from(student)))
}

/// Proctorship routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/professors/{professor_id}/proctorships",
        get(list_proctorships).post(assign_proctorship),
    )
}
