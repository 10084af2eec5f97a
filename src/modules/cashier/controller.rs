use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::{RequireCashierDelete, RequireCashierRead, RequireCashierRecord};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::cashier::model::{
    CashSummary, CashTransaction, CreateTransactionDto, PaginatedTransactionsResponse,
    SummaryParams, TransactionFilterParams,
};
use crate::modules::cashier::service::CashierService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/cashier/transactions",
    request_body = CreateTransactionDto,
    responses(
        (status = 200, description = "Transaction recorded", body = CashTransaction),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Cashier"
)]
#[instrument(skip(state, dto))]
pub async fn record_transaction(
    State(state): State<AppState>,
    RequireCashierRecord(auth): RequireCashierRecord,
    ValidatedJson(dto): ValidatedJson<CreateTransactionDto>,
) -> Result<Json<CashTransaction>, AppError> {
    let recorded_by = auth.user_id()?;
    let transaction = CashierService::record_transaction(&state.db, dto, recorded_by).await?;
    Ok(Json(transaction))
}

#[utoipa::path(
    get,
    path = "/api/cashier/transactions",
    params(
        ("kind" = Option<String>, Query, description = "income or expense"),
        ("from" = Option<String>, Query, description = "Inclusive start date (YYYY-MM-DD)"),
        ("to" = Option<String>, Query, description = "Inclusive end date (YYYY-MM-DD)"),
        ("limit" = Option<i64>, Query, description = "Items per page (1-100)"),
        ("page" = Option<i64>, Query, description = "Page number (1-indexed)")
    ),
    responses(
        (status = 200, description = "Ledger entries", body = PaginatedTransactionsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Cashier"
)]
#[instrument(skip(state))]
pub async fn get_transactions(
    State(state): State<AppState>,
    RequireCashierRead(_auth): RequireCashierRead,
    Query(params): Query<TransactionFilterParams>,
) -> Result<Json<PaginatedTransactionsResponse>, AppError> {
    let response = CashierService::get_transactions(&state.db, params).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/cashier/summary",
    params(
        ("from" = Option<String>, Query, description = "Inclusive start date (YYYY-MM-DD)"),
        ("to" = Option<String>, Query, description = "Inclusive end date (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "Income, expense and net totals", body = CashSummary),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Cashier"
)]
#[instrument(skip(state))]
pub async fn get_summary(
    State(state): State<AppState>,
    RequireCashierRead(_auth): RequireCashierRead,
    Query(params): Query<SummaryParams>,
) -> Result<Json<CashSummary>, AppError> {
    let summary = CashierService::summary(&state.db, params).await?;
    Ok(Json(summary))
}

#[utoipa::path(
    delete,
    path = "/api/cashier/transactions/{id}",
    params(("id" = Uuid, Path, description = "Transaction ID")),
    responses(
        (status = 200, description = "Transaction deleted"),
        (status = 404, description = "Transaction not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Cashier"
)]
#[instrument(skip(state))]
pub async fn delete_transaction(
    State(state): State<AppState>,
    RequireCashierDelete(_auth): RequireCashierDelete,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    CashierService::delete_transaction(&state.db, id).await?;
    Ok(Json(json!({ "message": "Transaction deleted successfully" })))
}
