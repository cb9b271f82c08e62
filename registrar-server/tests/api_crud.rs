//! End-to-end tests driving the real router against a live database.
//!
//! Run with: DATABASE_URL=postgres://... cargo test -p registrar-server -- --ignored

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::util::ServiceExt;
use uuid::Uuid;

use registrar_server::db::{create_pool, migrations};
use registrar_server::http::{build_router, AppState};

async fn test_app() -> Router {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let pool = create_pool(&url).await.expect("pool creation failed");
    migrations::run(&pool).await.expect("migrations failed");
    build_router(AppState { pool })
}

/// Random 12-digit aadhar so tests don't collide across runs.
fn rand_aadhar() -> String {
    format!("{:012}", Uuid::new_v4().as_u128() % 1_000_000_000_000)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_student(app: &Router, name: &str, aadhar: &str) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/students",
        Some(json!({
            "name": name,
            "dateOfBirth": "2004-05-17",
            "aadharNumber": aadhar,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create student failed: {body}");
    body
}

async fn create_professor(app: &Router, name: &str, aadhar: &str) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/professors",
        Some(json!({
            "name": name,
            "seniority": 5,
            "aadharNumber": aadhar,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create professor failed: {body}");
    body
}

#[tokio::test]
#[ignore = "requires database"]
async fn duplicate_student_aadhar_conflicts() {
    let app = test_app().await;
    let aadhar = rand_aadhar();

    create_student(&app, "first", &aadhar).await;

    let (status, body) = send(
        &app,
        "POST",
        "/students",
        Some(json!({
            "name": "second",
            "dateOfBirth": "2005-01-01",
            "aadharNumber": aadhar,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "conflict");

    // Exactly one student holds this aadhar number
    let (_, students) = send(&app, "GET", "/students", None).await;
    let count = students
        .as_array()
        .unwrap()
        .iter()
        .filter(|s| s["aadharNumber"] == aadhar.as_str())
        .count();
    assert_eq!(count, 1);
}

#[tokio::test]
#[ignore = "requires database"]
async fn created_student_listed_exactly_once() {
    let app = test_app().await;
    let aadhar = rand_aadhar();

    let created = create_student(&app, "listed", &aadhar).await;

    let (status, students) = send(&app, "GET", "/students", None).await;
    assert_eq!(status, StatusCode::OK);
    let matches: Vec<_> = students
        .as_array()
        .unwrap()
        .iter()
        .filter(|s| s["id"] == created["id"])
        .collect();
    assert_eq!(matches.len(), 1);
}

#[tokio::test]
#[ignore = "requires database"]
async fn enriched_listing_embeds_proctor() {
    let app = test_app().await;

    let professor = create_professor(&app, "Proctor Rao", &rand_aadhar()).await;

    let with_aadhar = rand_aadhar();
    let (status, assigned) = send(
        &app,
        "POST",
        "/students",
        Some(json!({
            "name": "assigned",
            "dateOfBirth": "2004-05-17",
            "aadharNumber": with_aadhar,
            "proctorId": professor["id"],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let unassigned = create_student(&app, "unassigned", &rand_aadhar()).await;

    let (status, enriched) = send(&app, "GET", "/students/enriched", None).await;
    assert_eq!(status, StatusCode::OK);
    let enriched = enriched.as_array().unwrap();

    let found = enriched
        .iter()
        .find(|s| s["id"] == assigned["id"])
        .expect("assigned student missing from enriched listing");
    assert_eq!(found["proctor"]["id"], professor["id"]);
    assert_eq!(found["proctor"]["name"], "Proctor Rao");

    let found = enriched
        .iter()
        .find(|s| s["id"] == unassigned["id"])
        .expect("unassigned student missing from enriched listing");
    assert!(found["proctor"].is_null());
}

#[tokio::test]
#[ignore = "requires database"]
async fn patch_clears_omitted_proctor_id() {
    let app = test_app().await;

    let professor = create_professor(&app, "Rao", &rand_aadhar()).await;
    let aadhar = rand_aadhar();
    let (_, student) = send(
        &app,
        "POST",
        "/students",
        Some(json!({
            "name": "patched",
            "dateOfBirth": "2004-05-17",
            "aadharNumber": aadhar,
            "proctorId": professor["id"],
        })),
    )
    .await;
    assert_eq!(student["proctorId"], professor["id"]);

    // Full overwrite: no proctorId in the body means NULL, not keep
    let uri = format!("/students/{}", student["id"].as_str().unwrap());
    let (status, updated) = send(
        &app,
        "PATCH",
        &uri,
        Some(json!({
            "name": "patched",
            "dateOfBirth": "2004-05-17",
            "aadharNumber": aadhar,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(updated["proctorId"].is_null());
}

#[tokio::test]
#[ignore = "requires database"]
async fn delete_missing_student_is_404_and_leaves_store() {
    let app = test_app().await;

    let (_, before) = send(&app, "GET", "/students", None).await;
    let before_count = before.as_array().unwrap().len();

    let uri = format!("/students/{}", Uuid::new_v4());
    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    let (_, after) = send(&app, "GET", "/students", None).await;
    assert_eq!(after.as_array().unwrap().len(), before_count);
}

#[tokio::test]
#[ignore = "requires database"]
async fn proctorship_assignment_flow() {
    let app = test_app().await;

    let professor = create_professor(&app, "A", &rand_aadhar()).await;
    let student = create_student(&app, "S", &rand_aadhar()).await;

    let uri = format!(
        "/professors/{}/proctorships",
        professor["id"].as_str().unwrap()
    );
    let (status, updated) = send(
        &app,
        "POST",
        &uri,
        Some(json!({ "studentId": student["id"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["proctorId"], professor["id"]);

    let (status, students) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let students = students.as_array().unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0]["id"], student["id"]);
}

#[tokio::test]
#[ignore = "requires database"]
async fn proctorship_on_unknown_professor_is_404() {
    let app = test_app().await;
    let student = create_student(&app, "S", &rand_aadhar()).await;

    let uri = format!("/professors/{}/proctorships", Uuid::new_v4());
    let (status, body) = send(
        &app,
        "POST",
        &uri,
        Some(json!({ "studentId": student["id"] })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
#[ignore = "requires database"]
async fn membership_on_unknown_student_is_404() {
    let app = test_app().await;

    let uri = format!("/students/{}/libraryMembership", Uuid::new_v4());
    let (status, body) = send(
        &app,
        "POST",
        &uri,
        Some(json!({
            "issueDate": "2024-01-01",
            "expiryDate": "2025-01-01",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    // Nothing was created for that id either
    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn membership_lifecycle() {
    let app = test_app().await;

    let student = create_student(&app, "member", &rand_aadhar()).await;
    let uri = format!(
        "/students/{}/libraryMembership",
        student["id"].as_str().unwrap()
    );

    // No membership yet
    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, created) = send(
        &app,
        "POST",
        &uri,
        Some(json!({
            "issueDate": "2024-01-01",
            "expiryDate": "2025-01-01",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["issueDate"], "2024-01-01");

    // Second membership for the same student is a conflict
    let (status, body) = send(
        &app,
        "POST",
        &uri,
        Some(json!({
            "issueDate": "2024-06-01",
            "expiryDate": "2025-06-01",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "conflict");

    let (status, updated) = send(
        &app,
        "PATCH",
        &uri,
        Some(json!({
            "issueDate": "2024-02-01",
            "expiryDate": "2025-02-01",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["expiryDate"], "2025-02-01");

    let (status, deleted) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["id"], created["id"]);

    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
