mod common;

use axum::http::StatusCode;
use common::{delete, get, post_json, put_json, spawn_app, superadmin_token};
use serde_json::json;

async fn create_student(
    test_app: &common::TestApp,
    token: &str,
    first_name: &str,
    total_sessions: Option<i64>,
) -> serde_json::Value {
    let mut payload = json!({
        "first_name": first_name,
        "last_name": "Student",
        "guardian_name": "A Guardian"
    });
    if let Some(total) = total_sessions {
        payload["total_sessions"] = json!(total);
    }
    let (status, body) = post_json(&test_app.app, "/api/students", Some(token), payload).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body
}

async fn create_course(test_app: &common::TestApp, token: &str, name: &str) -> serde_json::Value {
    let (status, body) = post_json(
        &test_app.app,
        "/api/courses",
        Some(token),
        json!({ "name": name, "level": "beginner" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body
}

async fn enroll(
    test_app: &common::TestApp,
    token: &str,
    student_id: &str,
    payload: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    post_json(
        &test_app.app,
        &format!("/api/students/{student_id}/enrollments"),
        Some(token),
        payload,
    )
    .await
}

#[tokio::test]
async fn student_crud_roundtrip() {
    let test_app = spawn_app().await;
    let token = superadmin_token(&test_app).await;

    let student = create_student(&test_app, &token, "Robin", None).await;
    let id = student["id"].as_str().unwrap();
    assert!(student["total_sessions"].is_null());

    let (status, fetched) = get(&test_app.app, &format!("/api/students/{id}"), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["first_name"], "Robin");

    let (status, updated) = put_json(
        &test_app.app,
        &format!("/api/students/{id}"),
        Some(&token),
        json!({ "first_name": "Robyn", "total_sessions": 20 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["first_name"], "Robyn");
    assert_eq!(updated["total_sessions"], 20);

    let (status, _) = delete(&test_app.app, &format!("/api/students/{id}"), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get(&test_app.app, &format!("/api/students/{id}"), Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn listing_students_supports_search_and_pagination() {
    let test_app = spawn_app().await;
    let token = superadmin_token(&test_app).await;

    for name in ["Ada", "Grace", "Alan"] {
        create_student(&test_app, &token, name, None).await;
    }

    let (status, body) = get(&test_app.app, "/api/students?search=Ada", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["meta"]["total"], 1);

    let (status, body) = get(&test_app.app, "/api/students?limit=2&page=1", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["meta"]["total"], 3);
}

#[tokio::test]
async fn enrollment_starts_from_the_students_session_total() {
    let test_app = spawn_app().await;
    let token = superadmin_token(&test_app).await;

    let student = create_student(&test_app, &token, "Robin", Some(8)).await;
    let course = create_course(&test_app, &token, "Robotics 101").await;
    let student_id = student["id"].as_str().unwrap();
    let course_id = course["id"].as_str().unwrap();

    let (status, enrollment) =
        enroll(&test_app, &token, student_id, json!({ "course_id": course_id })).await;
    assert_eq!(status, StatusCode::OK, "{enrollment}");
    assert_eq!(enrollment["sessions_remaining"], 8);
    assert_eq!(enrollment["course_name"], "Robotics 101");

    // An explicit override wins over the student setting.
    let other_course = create_course(&test_app, &token, "Robotics 201").await;
    let other_id = other_course["id"].as_str().unwrap();
    let (status, enrollment) = enroll(
        &test_app,
        &token,
        student_id,
        json!({ "course_id": other_id, "sessions": 4 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(enrollment["sessions_remaining"], 4);

    let (status, list) = get(
        &test_app.app,
        &format!("/api/students/{student_id}/enrollments"),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn enrollment_falls_back_to_the_course_session_default() {
    let test_app = spawn_app().await;
    let token = superadmin_token(&test_app).await;

    // No per-student session setting: the course default applies.
    let student = create_student(&test_app, &token, "Robin", None).await;
    let student_id = student["id"].as_str().unwrap();

    let (status, course) = post_json(
        &test_app.app,
        "/api/courses",
        Some(&token),
        json!({ "name": "Advanced Robotics", "level": "advanced", "default_sessions": 20 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{course}");
    assert_eq!(course["default_sessions"], 20);
    let course_id = course["id"].as_str().unwrap();

    let (status, enrollment) =
        enroll(&test_app, &token, student_id, json!({ "course_id": course_id })).await;
    assert_eq!(status, StatusCode::OK, "{enrollment}");
    assert_eq!(enrollment["sessions_remaining"], 20);

    // A course created without a default uses 12.
    let plain = create_course(&test_app, &token, "Robotics 101").await;
    assert_eq!(plain["default_sessions"], 12);
    let plain_id = plain["id"].as_str().unwrap();

    let (status, enrollment) =
        enroll(&test_app, &token, student_id, json!({ "course_id": plain_id })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(enrollment["sessions_remaining"], 12);

    // The student setting, once present, beats the course default.
    let (status, _) = put_json(
        &test_app.app,
        &format!("/api/students/{student_id}"),
        Some(&token),
        json!({ "total_sessions": 6 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let third = create_course(&test_app, &token, "Robotics 301").await;
    let third_id = third["id"].as_str().unwrap();
    let (status, enrollment) =
        enroll(&test_app, &token, student_id, json!({ "course_id": third_id })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(enrollment["sessions_remaining"], 6);
}

#[tokio::test]
async fn double_enrollment_conflicts() {
    let test_app = spawn_app().await;
    let token = superadmin_token(&test_app).await;

    let student = create_student(&test_app, &token, "Robin", None).await;
    let course = create_course(&test_app, &token, "Robotics 101").await;
    let student_id = student["id"].as_str().unwrap();
    let course_id = course["id"].as_str().unwrap();

    let uri = format!("/api/students/{student_id}/enrollments");
    let payload = json!({ "course_id": course_id });
    let (status, _) = post_json(&test_app.app, &uri, Some(&token), payload.clone()).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = post_json(&test_app.app, &uri, Some(&token), payload).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Unenroll, then enrolling again is fine.
    let (status, _) = delete(
        &test_app.app,
        &format!("/api/students/{student_id}/enrollments/{course_id}"),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = post_json(&test_app.app, &uri, Some(&token), json!({ "course_id": course_id })).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn enrolling_in_a_missing_course_is_not_found() {
    let test_app = spawn_app().await;
    let token = superadmin_token(&test_app).await;

    let student = create_student(&test_app, &token, "Robin", None).await;
    let student_id = student["id"].as_str().unwrap();

    let (status, _) = post_json(
        &test_app.app,
        &format!("/api/students/{student_id}/enrollments"),
        Some(&token),
        json!({ "course_id": uuid::Uuid::new_v4() }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
