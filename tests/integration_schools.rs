mod common;

use axum::http::StatusCode;
use common::{delete, get, post_json, put_json, spawn_app, superadmin_token};
use serde_json::json;

#[tokio::test]
async fn school_crud_roundtrip() {
    let test_app = spawn_app().await;
    let token = superadmin_token(&test_app).await;

    let (status, school) = post_json(
        &test_app.app,
        "/api/schools",
        Some(&token),
        json!({ "name": "Eastside Primary", "city": "Springfield" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{school}");
    let id = school["id"].as_str().unwrap();

    let (status, updated) = put_json(
        &test_app.app,
        &format!("/api/schools/{id}"),
        Some(&token),
        json!({ "contact_name": "J. Rivera" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["contact_name"], "J. Rivera");
    assert_eq!(updated["name"], "Eastside Primary");

    let (status, list) = get(&test_app.app, "/api/schools?search=Spring", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["data"].as_array().unwrap().len(), 1);

    let (status, _) = delete(&test_app.app, &format!("/api/schools/{id}"), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = get(&test_app.app, &format!("/api/schools/{id}"), Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn gafan_programs_link_to_partner_schools() {
    let test_app = spawn_app().await;
    let token = superadmin_token(&test_app).await;

    let (_, school) = post_json(
        &test_app.app,
        "/api/schools",
        Some(&token),
        json!({ "name": "Partner Academy" }),
    )
    .await;

    let (status, program) = post_json(
        &test_app.app,
        "/api/gafan",
        Some(&token),
        json!({
            "name": "Fall robotics club",
            "school_id": school["id"],
            "starts_on": "2026-09-01",
            "ends_on": "2026-12-15"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{program}");
    assert_eq!(program["school_id"], school["id"]);

    let school_id = school["id"].as_str().unwrap();
    let (status, list) = get(
        &test_app.app,
        &format!("/api/gafan?school_id={school_id}"),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn teachers_can_be_assigned_to_courses() {
    let test_app = spawn_app().await;
    let token = superadmin_token(&test_app).await;

    let (_, teacher) = post_json(
        &test_app.app,
        "/api/teachers",
        Some(&token),
        json!({ "first_name": "Mia", "last_name": "Mentor", "specialty": "LEGO robotics" }),
    )
    .await;

    let (status, course) = post_json(
        &test_app.app,
        "/api/courses",
        Some(&token),
        json!({ "name": "Robotics 101", "teacher_id": teacher["id"] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{course}");
    assert_eq!(course["teacher_id"], teacher["id"]);

    let teacher_id = teacher["id"].as_str().unwrap();
    let (status, list) = get(
        &test_app.app,
        &format!("/api/courses?teacher_id={teacher_id}"),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["data"].as_array().unwrap().len(), 1);
}
