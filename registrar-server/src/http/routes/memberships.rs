//! Library membership endpoints
//!
//! Singular sub-resource of a student: each student holds at most one
//! membership, so every verb keys on the owning student's id. All four
//! handlers verify the student exists before touching the membership.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::repos::{LibraryMembership, MembershipRepo, StudentRepo};
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// Create/replace membership request
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipPayload {
    pub issue_date: NaiveDate,
    pub expiry_date: NaiveDate,
}

/// Library membership response
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipResponse {
    pub id: Uuid,
    pub student_id: Uuid,
    pub issue_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub created_at: String,
}

impl From<LibraryMembership> for MembershipResponse {
    fn from(m: LibraryMembership) -> Self {
        Self {
            id: m.id,
            student_id: m.student_id,
            issue_date: m.issue_date,
            expiry_date: m.expiry_date,
            created_at: m.created_at.to_rfc3339(),
        }
    }
}

/// GET /students/{studentId}/libraryMembership - the student's membership
async fn get_membership(
    State(state): State<Arc<AppState>>,
    Path(student_id): Path<Uuid>,
) -> Result<Json<MembershipResponse>, ApiError> {
    StudentRepo::new(&state.pool).get(student_id).await?;

    let membership = MembershipRepo::new(&state.pool)
        .get_for_student(student_id)
        .await?;

    Ok(Json(MembershipResponse::from(membership)))
}

/// POST /students/{studentId}/libraryMembership - issue a membership
///
/// A second membership for the same student is a conflict.
async fn create_membership(
    State(state): State<Arc<AppState>>,
    Path(student_id): Path<Uuid>,
    Json(req): Json<MembershipPayload>,
) -> Result<Json<MembershipResponse>, ApiError> {
    StudentRepo::new(&state.pool).get(student_id).await?;

    let membership = MembershipRepo::new(&state.pool)
        .create(student_id, req.issue_date, req.expiry_date)
        .await?;

    Ok(Json(MembershipResponse::from(membership)))
}

/// PATCH /students/{studentId}/libraryMembership - overwrite both dates
async fn update_membership(
    State(state): State<Arc<AppState>>,
    Path(student_id): Path<Uuid>,
    Json(req): Json<MembershipPayload>,
) -> Result<Json<MembershipResponse>, ApiError> {
    StudentRepo::new(&state.pool).get(student_id).await?;

    let membership = MembershipRepo::new(&state.pool)
        .update_for_student(student_id, req.issue_date, req.expiry_date)
        .await?;

    Ok(Json(MembershipResponse::from(membership)))
}

/// DELETE /students/{studentId}/libraryMembership - revoke the membership
async fn delete_membership(
    State(state): State<Arc<AppState>>,
    Path(student_id): Path<Uuid>,
) -> Result<Json<MembershipResponse>, ApiError> {
    StudentRepo::new(&state.pool).get(student_id).await?;

    let membership = MembershipRepo::new(&state.pool)
        .delete_for_student(student_id)
        .await?;

    Ok(Json(MembershipResponse::from(membership)))
}

/// Library membership routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/students/{student_id}/libraryMembership",
        get(get_membership)
            .post(create_membership)
            .patch(update_membership)
            .delete(delete_membership),
    )
}
