mod common;

use axum::http::StatusCode;
use common::{get, post_json, spawn_app, superadmin_token};
use serde_json::json;

#[tokio::test]
async fn login_returns_token_and_user() {
    let test_app = spawn_app().await;
    robokademi::cli::create_superadmin(
        &test_app.pool,
        "Ada",
        "Admin",
        "ada@example.com",
        "secretpass1",
    )
    .await
    .unwrap();

    let (status, body) = post_json(
        &test_app.app,
        "/api/auth/login",
        None,
        json!({ "email": "ada@example.com", "password": "secretpass1" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["access_token"].as_str().is_some());
    assert_eq!(body["user"]["email"], "ada@example.com");
    assert_eq!(body["user"]["role"], "super_admin");
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let test_app = spawn_app().await;
    robokademi::cli::create_superadmin(
        &test_app.pool,
        "Ada",
        "Admin",
        "ada@example.com",
        "secretpass1",
    )
    .await
    .unwrap();

    let (status, _) = post_json(
        &test_app.app,
        "/api/auth/login",
        None,
        json!({ "email": "ada@example.com", "password": "wrongpass" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = post_json(
        &test_app.app,
        "/api/auth/login",
        None,
        json!({ "email": "nobody@example.com", "password": "secretpass1" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_returns_profile_with_permissions() {
    let test_app = spawn_app().await;
    let token = superadmin_token(&test_app).await;

    let (status, body) = get(&test_app.app, "/api/auth/me", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "root@example.com");
    assert!(body["permissions"].as_array().is_some_and(|p| !p.is_empty()));
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let test_app = spawn_app().await;

    let (status, _) = get(&test_app.app, "/api/auth/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = get(&test_app.app, "/api/students", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = get(&test_app.app, "/api/students", Some("not-a-jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
