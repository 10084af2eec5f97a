mod common;

use axum::http::StatusCode;
use common::{get, post_json, put_json, spawn_app, superadmin_token};
use serde_json::json;

#[tokio::test]
async fn registration_lifecycle() {
    let test_app = spawn_app().await;
    let token = superadmin_token(&test_app).await;

    let (_, student) = post_json(
        &test_app.app,
        "/api/students",
        Some(&token),
        json!({ "first_name": "Robin", "last_name": "Student" }),
    )
    .await;
    let (_, course) = post_json(
        &test_app.app,
        "/api/courses",
        Some(&token),
        json!({ "name": "Robotics 101" }),
    )
    .await;

    let (status, registration) = post_json(
        &test_app.app,
        "/api/registrations",
        Some(&token),
        json!({
            "student_id": student["id"],
            "course_id": course["id"],
            "registered_on": "2026-08-20"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{registration}");
    assert_eq!(registration["status"], "pending");

    let id = registration["id"].as_str().unwrap();
    let (status, updated) = put_json(
        &test_app.app,
        &format!("/api/registrations/{id}"),
        Some(&token),
        json!({ "status": "confirmed" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "confirmed");

    let (status, list) = get(
        &test_app.app,
        "/api/registrations?status=confirmed",
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["data"].as_array().unwrap().len(), 1);

    let (_, list) = get(
        &test_app.app,
        "/api/registrations?status=cancelled",
        Some(&token),
    )
    .await;
    assert_eq!(list["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn registrations_require_existing_student_and_course() {
    let test_app = spawn_app().await;
    let token = superadmin_token(&test_app).await;

    let (status, _) = post_json(
        &test_app.app,
        "/api/registrations",
        Some(&token),
        json!({
            "student_id": uuid::Uuid::new_v4(),
            "course_id": uuid::Uuid::new_v4()
        }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
