mod common;

use axum::http::StatusCode;
use common::{delete, get, post_json, put_json, spawn_app, superadmin_token};
use serde_json::json;

async fn create_teacher(
    test_app: &common::TestApp,
    token: &str,
    first_name: &str,
    email: Option<&str>,
) -> serde_json::Value {
    let mut payload = json!({
        "first_name": first_name,
        "last_name": "Instructor",
        "specialty": "robotics"
    });
    if let Some(email) = email {
        payload["email"] = json!(email);
    }
    let (status, body) = post_json(&test_app.app, "/api/teachers", Some(token), payload).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body
}

#[tokio::test]
async fn teacher_crud_roundtrip() {
    let test_app = spawn_app().await;
    let token = superadmin_token(&test_app).await;

    let teacher = create_teacher(&test_app, &token, "Kim", Some("kim@example.com")).await;
    let id = teacher["id"].as_str().unwrap();
    assert_eq!(teacher["specialty"], "robotics");

    let (status, fetched) = get(&test_app.app, &format!("/api/teachers/{id}"), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["email"], "kim@example.com");

    let (status, updated) = put_json(
        &test_app.app,
        &format!("/api/teachers/{id}"),
        Some(&token),
        json!({ "specialty": "electronics", "phone": "555-0101" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["specialty"], "electronics");
    assert_eq!(updated["phone"], "555-0101");
    assert_eq!(updated["first_name"], "Kim");

    let (status, _) = delete(&test_app.app, &format!("/api/teachers/{id}"), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = get(&test_app.app, &format!("/api/teachers/{id}"), Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_teacher_email_is_rejected() {
    let test_app = spawn_app().await;
    let token = superadmin_token(&test_app).await;

    create_teacher(&test_app, &token, "Kim", Some("kim@example.com")).await;

    let (status, body) = post_json(
        &test_app.app,
        "/api/teachers",
        Some(&token),
        json!({
            "first_name": "Kimber",
            "last_name": "Instructor",
            "email": "kim@example.com"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "A teacher with that email already exists");

    // Updating into a taken email is rejected the same way.
    let other = create_teacher(&test_app, &token, "Lee", Some("lee@example.com")).await;
    let other_id = other["id"].as_str().unwrap();
    let (status, _) = put_json(
        &test_app.app,
        &format!("/api/teachers/{other_id}"),
        Some(&token),
        json!({ "email": "kim@example.com" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn listing_teachers_supports_search_and_school_filter() {
    let test_app = spawn_app().await;
    let token = superadmin_token(&test_app).await;

    let (_, school) = post_json(
        &test_app.app,
        "/api/schools",
        Some(&token),
        json!({ "name": "Eastside Primary" }),
    )
    .await;
    let school_id = school["id"].as_str().unwrap();

    create_teacher(&test_app, &token, "Ada", None).await;
    let (status, _) = post_json(
        &test_app.app,
        "/api/teachers",
        Some(&token),
        json!({
            "first_name": "Grace",
            "last_name": "Instructor",
            "school_id": school_id
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get(&test_app.app, "/api/teachers?search=Ada", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["meta"]["total"], 1);

    let (status, body) = get(
        &test_app.app,
        &format!("/api/teachers?school_id={school_id}"),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["first_name"], "Grace");
}
