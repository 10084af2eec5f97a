use anyhow::anyhow;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{
    CashSummary, CashTransaction, CreateTransactionDto, PaginatedTransactionsResponse,
    SummaryParams, TransactionFilterParams,
};

const TRANSACTION_COLUMNS: &str =
    "id, kind, amount_cents, note, occurred_on, recorded_by, created_at";

pub struct CashierService;

impl CashierService {
    #[instrument(skip(pool, dto))]
    pub async fn record_transaction(
        pool: &SqlitePool,
        dto: CreateTransactionDto,
        recorded_by: Uuid,
    ) -> Result<CashTransaction, AppError> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let occurred_on = dto.occurred_on.unwrap_or_else(|| now.date_naive());

        sqlx::query(
            "INSERT INTO cash_transactions (id, kind, amount_cents, note, occurred_on, recorded_by, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(dto.kind.as_str())
        .bind(dto.amount_cents)
        .bind(&dto.note)
        .bind(occurred_on)
        .bind(recorded_by)
        .bind(now)
        .execute(pool)
        .await?;

        Self::get_transaction(pool, id).await
    }

    #[instrument(skip(pool))]
    pub async fn get_transactions(
        pool: &SqlitePool,
        filters: TransactionFilterParams,
    ) -> Result<PaginatedTransactionsResponse, AppError> {
        let mut where_clause = String::from(" WHERE 1=1");
        if filters.kind.is_some() {
            where_clause.push_str(" AND kind = ?");
        }
        if filters.from.is_some() {
            where_clause.push_str(" AND occurred_on >= ?");
        }
        if filters.to.is_some() {
            where_clause.push_str(" AND occurred_on <= ?");
        }

        let count_sql = format!("SELECT COUNT(*) FROM cash_transactions{where_clause}");
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        if let Some(kind) = filters.kind {
            count_query = count_query.bind(kind.as_str());
        }
        if let Some(from) = filters.from {
            count_query = count_query.bind(from);
        }
        if let Some(to) = filters.to {
            count_query = count_query.bind(to);
        }
        let total = count_query.fetch_one(pool).await?;

        let list_sql = format!(
            "SELECT {TRANSACTION_COLUMNS} FROM cash_transactions{where_clause} ORDER BY occurred_on DESC, created_at DESC LIMIT ? OFFSET ?"
        );
        let mut list_query = sqlx::query_as::<_, CashTransaction>(&list_sql);
        if let Some(kind) = filters.kind {
            list_query = list_query.bind(kind.as_str());
        }
        if let Some(from) = filters.from {
            list_query = list_query.bind(from);
        }
        if let Some(to) = filters.to {
            list_query = list_query.bind(to);
        }
        let data = list_query
            .bind(filters.pagination.limit())
            .bind(filters.pagination.offset())
            .fetch_all(pool)
            .await?;

        let meta = filters.pagination.meta(data.len(), total);
        Ok(PaginatedTransactionsResponse { data, meta })
    }

    #[instrument(skip(pool))]
    pub async fn get_transaction(pool: &SqlitePool, id: Uuid) -> Result<CashTransaction, AppError> {
        let sql = format!("SELECT {TRANSACTION_COLUMNS} FROM cash_transactions WHERE id = ?");
        sqlx::query_as::<_, CashTransaction>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Transaction not found")))
    }

    /// Income/expense/net totals over an optional date range.
    #[instrument(skip(pool))]
    pub async fn summary(pool: &SqlitePool, params: SummaryParams) -> Result<CashSummary, AppError> {
        let mut where_clause = String::from(" WHERE 1=1");
        if params.from.is_some() {
            where_clause.push_str(" AND occurred_on >= ?");
        }
        if params.to.is_some() {
            where_clause.push_str(" AND occurred_on <= ?");
        }

        let sql = format!(
            "SELECT
                COALESCE(SUM(CASE WHEN kind = 'income' THEN amount_cents ELSE 0 END), 0),
                COALESCE(SUM(CASE WHEN kind = 'expense' THEN amount_cents ELSE 0 END), 0)
             FROM cash_transactions{where_clause}"
        );
        let mut query = sqlx::query_as::<_, (i64, i64)>(&sql);
        if let Some(from) = params.from {
            query = query.bind(from);
        }
        if let Some(to) = params.to {
            query = query.bind(to);
        }
        let (income_cents, expense_cents) = query.fetch_one(pool).await?;

        Ok(CashSummary {
            income_cents,
            expense_cents,
            net_cents: income_cents - expense_cents,
        })
    }

    #[instrument(skip(pool))]
    pub async fn delete_transaction(pool: &SqlitePool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM cash_transactions WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Transaction not found")));
        }
        Ok(())
    }
}
