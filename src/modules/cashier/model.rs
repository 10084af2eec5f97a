use chrono::{DateTime, NaiveDate, Utc};
use robokademi_core::PaginationMeta;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

/// One line in the cash ledger. Amounts are integer cents.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CashTransaction {
    pub id: Uuid,
    pub kind: String,
    pub amount_cents: i64,
    pub note: Option<String>,
    pub occurred_on: NaiveDate,
    pub recorded_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTransactionDto {
    pub kind: TransactionKind,
    #[validate(range(min = 1, message = "amount_cents must be positive"))]
    pub amount_cents: i64,
    pub note: Option<String>,
    /// Defaults to today when omitted.
    pub occurred_on: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct TransactionFilterParams {
    pub kind: Option<TransactionKind>,
    /// Inclusive lower bound on occurred_on.
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound on occurred_on.
    pub to: Option<NaiveDate>,
    #[serde(flatten)]
    pub pagination: robokademi_core::PaginationParams,
}

#[derive(Debug, Deserialize)]
pub struct SummaryParams {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedTransactionsResponse {
    pub data: Vec<CashTransaction>,
    pub meta: PaginationMeta,
}

/// Totals over a date range.
#[derive(Debug, Serialize, ToSchema)]
pub struct CashSummary {
    pub income_cents: i64,
    pub expense_cents: i64,
    pub net_cents: i64,
}
