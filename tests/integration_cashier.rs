mod common;

use axum::http::StatusCode;
use common::{delete, get, post_json, spawn_app, superadmin_token};
use serde_json::json;

async fn record(
    test_app: &common::TestApp,
    token: &str,
    kind: &str,
    amount_cents: i64,
    occurred_on: &str,
) -> serde_json::Value {
    let (status, body) = post_json(
        &test_app.app,
        "/api/cashier/transactions",
        Some(token),
        json!({
            "kind": kind,
            "amount_cents": amount_cents,
            "occurred_on": occurred_on,
            "note": "test entry"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body
}

#[tokio::test]
async fn summary_reports_income_expense_and_net() {
    let test_app = spawn_app().await;
    let token = superadmin_token(&test_app).await;

    record(&test_app, &token, "income", 50_000, "2026-08-01").await;
    record(&test_app, &token, "income", 25_000, "2026-08-15").await;
    record(&test_app, &token, "expense", 10_000, "2026-08-20").await;

    let (status, summary) = get(&test_app.app, "/api/cashier/summary", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["income_cents"], 75_000);
    assert_eq!(summary["expense_cents"], 10_000);
    assert_eq!(summary["net_cents"], 65_000);
}

#[tokio::test]
async fn summary_respects_the_date_range() {
    let test_app = spawn_app().await;
    let token = superadmin_token(&test_app).await;

    record(&test_app, &token, "income", 50_000, "2026-07-31").await;
    record(&test_app, &token, "income", 25_000, "2026-08-15").await;
    record(&test_app, &token, "expense", 10_000, "2026-09-01").await;

    let (status, summary) = get(
        &test_app.app,
        "/api/cashier/summary?from=2026-08-01&to=2026-08-31",
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["income_cents"], 25_000);
    assert_eq!(summary["expense_cents"], 0);
    assert_eq!(summary["net_cents"], 25_000);
}

#[tokio::test]
async fn transactions_filter_by_kind_and_date() {
    let test_app = spawn_app().await;
    let token = superadmin_token(&test_app).await;

    record(&test_app, &token, "income", 50_000, "2026-08-01").await;
    record(&test_app, &token, "expense", 10_000, "2026-08-02").await;
    record(&test_app, &token, "expense", 5_000, "2026-08-03").await;

    let (status, body) = get(
        &test_app.app,
        "/api/cashier/transactions?kind=expense",
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["meta"]["total"], 2);

    let (_, body) = get(
        &test_app.app,
        "/api/cashier/transactions?from=2026-08-02&to=2026-08-02",
        Some(&token),
    )
    .await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["kind"], "expense");
    assert_eq!(data[0]["amount_cents"], 10_000);
}

#[tokio::test]
async fn transactions_carry_the_recording_user() {
    let test_app = spawn_app().await;
    let token = superadmin_token(&test_app).await;

    let body = record(&test_app, &token, "income", 1_000, "2026-08-01").await;
    assert!(body["recorded_by"].as_str().is_some());

    let id = body["id"].as_str().unwrap();
    let (status, _) = delete(
        &test_app.app,
        &format!("/api/cashier/transactions/{id}"),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, summary) = get(&test_app.app, "/api/cashier/summary", Some(&token)).await;
    assert_eq!(summary["net_cents"], 0);
}

#[tokio::test]
async fn zero_amounts_are_rejected() {
    let test_app = spawn_app().await;
    let token = superadmin_token(&test_app).await;

    let (status, _) = post_json(
        &test_app.app,
        "/api/cashier/transactions",
        Some(&token),
        json!({ "kind": "income", "amount_cents": 0 }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}
