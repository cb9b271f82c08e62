//! Professor endpoints
//!
//! Every lookup, update, and delete keys on the primary id. PATCH is a
//! full-field overwrite, as for students.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    routing::patch,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::repos::{Professor, ProfessorRepo};
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::AadharNumber;

/// Create/replace professor request (full-field body)
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessorPayload {
    pub name: String,
    pub seniority: i32,
    pub aadhar_number: String,
}

/// Professor response
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessorResponse {
    pub id: Uuid,
    pub name: String,
    pub seniority: i32,
    pub aadhar_number: String,
    pub created_at: String,
}

impl From<Professor> for ProfessorResponse {
    fn from(p: Professor) -> Self {
        Self {
            id: p.id,
            name: p.name,
            seniority: p.seniority,
            aadhar_number: p.aadhar_number,
            created_at: p.created_at.to_rfc3339(),
        }
    }
}

/// GET /professors - list all professors
async fn list_professors(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ProfessorResponse>>, ApiError> {
    let professors = ProfessorRepo::new(&state.pool).list().await?;
    Ok(Json(
        professors.into_iter().map(ProfessorResponse::from).collect(),
    ))
}

/// POST /professors - create a new professor
async fn create_professor(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ProfessorPayload>,
) -> Result<Json<ProfessorResponse>, ApiError> {
    let aadhar = AadharNumber::new(&req.aadhar_number)?;

    let professor = ProfessorRepo::new(&state.pool)
        .create(&req.name, req.seniority, aadhar)
        .await?;

    Ok(Json(ProfessorResponse::from(professor)))
}

/// PATCH /professors/{professorId} - overwrite all fields of a professor
async fn update_professor(
    State(state): State<Arc<AppState>>,
    Path(professor_id): Path<Uuid>,
    Json(req): Json<ProfessorPayload>,
) -> Result<Json<ProfessorResponse>, ApiError> {
    let aadhar = AadharNumber::new(&req.aadhar_number)?;

    let professor = ProfessorRepo::new(&state.pool)
        .update(professor_id, &req.name, req.seniority, aadhar)
        .await?;

    Ok(Json(ProfessorResponse::from(professor)))
}

/// DELETE /professors/{professorId} - delete a professor, returning the record
async fn delete_professor(
    State(state): State<Arc<AppState>>,
    Path(professor_id): Path<Uuid>,
) -> Result<Json<ProfessorResponse>, ApiError> {
    let professor = ProfessorRepo::new(&state.pool).delete(professor_id).await?;
    Ok(Json(ProfessorResponse::from(professor)))
}

/// Professor routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/professors", get(list_professors).post(create_professor))
        .route(
            "/professors/{professor_id}",
            patch(update_professor).delete(delete_professor),
        )
}
