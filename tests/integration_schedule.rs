mod common;

use axum::http::StatusCode;
use common::{get, post_json, spawn_app, superadmin_token};
use serde_json::json;

async fn create_event(
    test_app: &common::TestApp,
    token: &str,
    title: &str,
    starts_at: &str,
    ends_at: &str,
) -> serde_json::Value {
    let (status, body) = post_json(
        &test_app.app,
        "/api/schedule/events",
        Some(token),
        json!({ "title": title, "starts_at": starts_at, "ends_at": ends_at }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body
}

#[tokio::test]
async fn events_are_listed_by_overlapping_window() {
    let test_app = spawn_app().await;
    let token = superadmin_token(&test_app).await;

    create_event(
        &test_app,
        &token,
        "Monday class",
        "2026-09-07T14:00:00Z",
        "2026-09-07T15:30:00Z",
    )
    .await;
    create_event(
        &test_app,
        &token,
        "Friday class",
        "2026-09-11T14:00:00Z",
        "2026-09-11T15:30:00Z",
    )
    .await;

    let (status, all) = get(&test_app.app, "/api/schedule/events", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (_, windowed) = get(
        &test_app.app,
        "/api/schedule/events?from=2026-09-10T00:00:00Z&to=2026-09-12T00:00:00Z",
        Some(&token),
    )
    .await;
    let windowed = windowed.as_array().unwrap();
    assert_eq!(windowed.len(), 1);
    assert_eq!(windowed[0]["title"], "Friday class");
}

#[tokio::test]
async fn events_must_end_after_they_start() {
    let test_app = spawn_app().await;
    let token = superadmin_token(&test_app).await;

    let (status, _) = post_json(
        &test_app.app,
        "/api/schedule/events",
        Some(&token),
        json!({
            "title": "Backwards",
            "starts_at": "2026-09-07T15:00:00Z",
            "ends_at": "2026-09-07T14:00:00Z"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
