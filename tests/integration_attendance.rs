mod common;

use axum::http::StatusCode;
use common::{get, post_json, put_json, spawn_app, superadmin_token};
use serde_json::json;

struct Fixture {
    student_id: String,
    course_id: String,
}

/// Student with two prepaid sessions, enrolled in one course.
async fn enrolled_student(test_app: &common::TestApp, token: &str, sessions: i64) -> Fixture {
    let (_, student) = post_json(
        &test_app.app,
        "/api/students",
        Some(token),
        json!({ "first_name": "Robin", "last_name": "Student" }),
    )
    .await;
    let (_, course) = post_json(
        &test_app.app,
        "/api/courses",
        Some(token),
        json!({ "name": "Robotics 101" }),
    )
    .await;
    let student_id = student["id"].as_str().unwrap().to_string();
    let course_id = course["id"].as_str().unwrap().to_string();

    let (status, body) = post_json(
        &test_app.app,
        &format!("/api/students/{student_id}/enrollments"),
        Some(token),
        json!({ "course_id": course_id, "sessions": sessions }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    Fixture {
        student_id,
        course_id,
    }
}

async fn mark(
    test_app: &common::TestApp,
    token: &str,
    fixture: &Fixture,
    date: &str,
    status: &str,
) -> serde_json::Value {
    let (http_status, body) = put_json(
        &test_app.app,
        "/api/attendance/marks",
        Some(token),
        json!({
            "subject_kind": "course",
            "subject_id": fixture.course_id,
            "date": date,
            "person_id": fixture.student_id,
            "status": status
        }),
    )
    .await;
    assert_eq!(http_status, StatusCode::OK, "{body}");
    body
}

#[tokio::test]
async fn present_marks_debit_one_session_each() {
    let test_app = spawn_app().await;
    let token = superadmin_token(&test_app).await;
    let fixture = enrolled_student(&test_app, &token, 2).await;

    let body = mark(&test_app, &token, &fixture, "2026-09-01", "present").await;
    assert_eq!(body["session_debited"], true);
    assert_eq!(body["sessions_remaining"], 1);
    assert_eq!(body["prior_status"], serde_json::Value::Null);

    let body = mark(&test_app, &token, &fixture, "2026-09-08", "present").await;
    assert_eq!(body["session_debited"], true);
    assert_eq!(body["sessions_remaining"], 0);
}

#[tokio::test]
async fn remarking_present_is_idempotent() {
    let test_app = spawn_app().await;
    let token = superadmin_token(&test_app).await;
    let fixture = enrolled_student(&test_app, &token, 2).await;

    mark(&test_app, &token, &fixture, "2026-09-01", "present").await;
    let body = mark(&test_app, &token, &fixture, "2026-09-01", "present").await;
    assert_eq!(body["session_debited"], false);
    assert_eq!(body["sessions_remaining"], 1);
    assert_eq!(body["prior_status"], "present");
}

#[tokio::test]
async fn non_present_marks_never_debit_and_never_refund() {
    let test_app = spawn_app().await;
    let token = superadmin_token(&test_app).await;
    let fixture = enrolled_student(&test_app, &token, 2).await;

    let body = mark(&test_app, &token, &fixture, "2026-09-01", "absent").await;
    assert_eq!(body["session_debited"], false);
    assert_eq!(body["sessions_remaining"], 2);

    // Correcting absent to present debits once.
    let body = mark(&test_app, &token, &fixture, "2026-09-01", "present").await;
    assert_eq!(body["session_debited"], true);
    assert_eq!(body["sessions_remaining"], 1);

    // Correcting back does not refund.
    let body = mark(&test_app, &token, &fixture, "2026-09-01", "sick").await;
    assert_eq!(body["session_debited"], false);
    assert_eq!(body["sessions_remaining"], 1);

    // Re-entering present after a correction debits again.
    let body = mark(&test_app, &token, &fixture, "2026-09-01", "present").await;
    assert_eq!(body["session_debited"], true);
    assert_eq!(body["sessions_remaining"], 0);
}

#[tokio::test]
async fn balance_never_goes_below_zero() {
    let test_app = spawn_app().await;
    let token = superadmin_token(&test_app).await;
    let fixture = enrolled_student(&test_app, &token, 1).await;

    let body = mark(&test_app, &token, &fixture, "2026-09-01", "present").await;
    assert_eq!(body["sessions_remaining"], 0);

    // The mark is still recorded even though nothing is left to debit.
    let body = mark(&test_app, &token, &fixture, "2026-09-08", "present").await;
    assert_eq!(body["session_debited"], false);
    assert_eq!(body["sessions_remaining"], 0);
    assert_eq!(body["mark"]["status"], "present");
}

#[tokio::test]
async fn unenrolled_marks_are_recorded_without_a_debit() {
    let test_app = spawn_app().await;
    let token = superadmin_token(&test_app).await;

    let (_, student) = post_json(
        &test_app.app,
        "/api/students",
        Some(&token),
        json!({ "first_name": "Walkin", "last_name": "Student" }),
    )
    .await;
    let (_, course) = post_json(
        &test_app.app,
        "/api/courses",
        Some(&token),
        json!({ "name": "Robotics 101" }),
    )
    .await;

    let (status, body) = put_json(
        &test_app.app,
        "/api/attendance/marks",
        Some(&token),
        json!({
            "subject_kind": "course",
            "subject_id": course["id"],
            "date": "2026-09-01",
            "person_id": student["id"],
            "status": "present"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["session_debited"], false);
    assert_eq!(body["sessions_remaining"], serde_json::Value::Null);
}

#[tokio::test]
async fn teacher_sheets_never_touch_balances() {
    let test_app = spawn_app().await;
    let token = superadmin_token(&test_app).await;
    let fixture = enrolled_student(&test_app, &token, 2).await;

    // A teacher-sheet mark for the same person id must not debit.
    let (status, body) = put_json(
        &test_app.app,
        "/api/attendance/marks",
        Some(&token),
        json!({
            "subject_kind": "teacher",
            "subject_id": fixture.course_id,
            "date": "2026-09-01",
            "person_id": fixture.student_id,
            "status": "present"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["session_debited"], false);

    let (_, enrollments) = get(
        &test_app.app,
        &format!("/api/students/{}/enrollments", fixture.student_id),
        Some(&token),
    )
    .await;
    assert_eq!(enrollments[0]["sessions_remaining"], 2);
}

#[tokio::test]
async fn course_sheet_joins_marks_and_balances() {
    let test_app = spawn_app().await;
    let token = superadmin_token(&test_app).await;
    let fixture = enrolled_student(&test_app, &token, 2).await;

    mark(&test_app, &token, &fixture, "2026-09-01", "present").await;

    let (status, sheet) = get(
        &test_app.app,
        &format!("/api/attendance/courses/{}/sheet/2026-09-01", fixture.course_id),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{sheet}");
    let rows = sheet.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["status"], "present");
    assert_eq!(rows[0]["sessions_remaining"], 1);

    // A date with no marks still lists the roster.
    let (_, sheet) = get(
        &test_app.app,
        &format!("/api/attendance/courses/{}/sheet/2026-09-08", fixture.course_id),
        Some(&token),
    )
    .await;
    let rows = sheet.as_array().unwrap();
    assert_eq!(rows[0]["status"], serde_json::Value::Null);
}

#[tokio::test]
async fn marks_can_be_listed_by_subject_and_date() {
    let test_app = spawn_app().await;
    let token = superadmin_token(&test_app).await;
    let fixture = enrolled_student(&test_app, &token, 5).await;

    mark(&test_app, &token, &fixture, "2026-09-01", "present").await;
    mark(&test_app, &token, &fixture, "2026-09-08", "absent").await;

    let (status, marks) = get(
        &test_app.app,
        &format!("/api/attendance/marks?subject_id={}", fixture.course_id),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(marks.as_array().unwrap().len(), 2);

    let (_, marks) = get(
        &test_app.app,
        &format!(
            "/api/attendance/marks?subject_id={}&date=2026-09-08",
            fixture.course_id
        ),
        Some(&token),
    )
    .await;
    let marks = marks.as_array().unwrap();
    assert_eq!(marks.len(), 1);
    assert_eq!(marks[0]["status"], "absent");
}
