use axum::Router;
use axum::body::{self, Body};
use axum::http::{Request, StatusCode};
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use tempfile::TempDir;
use tower::util::ServiceExt;

use robokademi::cli::create_superadmin;
use robokademi::config::database::MIGRATOR;
use robokademi::router::init_router;
use robokademi::state::AppState;

/// A fully wired application over a fresh SQLite database in a temp
/// directory. The directory guard must stay alive for the duration of
/// the test.
#[allow(dead_code)]
pub struct TestApp {
    pub app: Router,
    pub pool: SqlitePool,
    _dir: TempDir,
}

pub async fn spawn_app() -> TestApp {
    let dir = TempDir::new().expect("failed to create tempdir");
    let opts = SqliteConnectOptions::new()
        .filename(dir.path().join("test.db"))
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePool::connect_with(opts)
        .await
        .expect("failed to open test database");
    MIGRATOR.run(&pool).await.expect("migrations failed");

    let state = AppState::with_pool(pool.clone());
    TestApp {
        app: init_router(state),
        pool,
        _dir: dir,
    }
}

/// Creates a super admin and returns a bearer token for it.
#[allow(dead_code)]
pub async fn superadmin_token(test_app: &TestApp) -> String {
    create_superadmin(&test_app.pool, "Root", "Admin", "root@example.com", "rootpass123")
        .await
        .expect("failed to create super admin");
    login(&test_app.app, "root@example.com", "rootpass123").await
}

#[allow(dead_code)]
pub async fn login(app: &Router, email: &str, password: &str) -> String {
    let (status, body) = post_json(
        app,
        "/api/auth/login",
        None,
        serde_json::json!({ "email": email, "password": password }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["access_token"]
        .as_str()
        .expect("missing access_token")
        .to_string()
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    json: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match json {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(value.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("failed to build request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("request failed");
    let status = response.status();
    let bytes = body::to_bytes(response.into_body(), 10_485_760)
        .await
        .expect("failed to read body");
    let value = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, value)
}

#[allow(dead_code)]
pub async fn get(app: &Router, uri: &str, token: Option<&str>) -> (StatusCode, serde_json::Value) {
    send(app, "GET", uri, token, None).await
}

#[allow(dead_code)]
pub async fn post_json(
    app: &Router,
    uri: &str,
    token: Option<&str>,
    json: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, "POST", uri, token, Some(json)).await
}

#[allow(dead_code)]
pub async fn put_json(
    app: &Router,
    uri: &str,
    token: Option<&str>,
    json: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, "PUT", uri, token, Some(json)).await
}

#[allow(dead_code)]
pub async fn delete(
    app: &Router,
    uri: &str,
    token: Option<&str>,
) -> (StatusCode, serde_json::Value) {
    send(app, "DELETE", uri, token, None).await
}
