use anyhow::anyhow;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{
    CreateGafanProgramDto, GafanFilterParams, GafanProgram, PaginatedGafanResponse,
    UpdateGafanProgramDto,
};

const GAFAN_COLUMNS: &str =
    "id, name, school_id, starts_on, ends_on, notes, created_at, updated_at";

pub struct GafanService;

impl GafanService {
    #[instrument(skip(pool, dto))]
    pub async fn create_program(
        pool: &SqlitePool,
        dto: CreateGafanProgramDto,
    ) -> Result<GafanProgram, AppError> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO gafan_programs (id, name, school_id, starts_on, ends_on, notes, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(&dto.name)
        .bind(dto.school_id)
        .bind(dto.starts_on)
        .bind(dto.ends_on)
        .bind(&dto.notes)
        .bind(now)
        .bind(now)
        .execute(pool)
        .await?;

        Self::get_program(pool, id).await
    }

    #[instrument(skip(pool))]
    pub async fn get_programs(
        pool: &SqlitePool,
        filters: GafanFilterParams,
    ) -> Result<PaginatedGafanResponse, AppError> {
        let mut where_clause = String::from(" WHERE 1=1");
        if filters.search.is_some() {
            where_clause.push_str(" AND name LIKE ?");
        }
        if filters.school_id.is_some() {
            where_clause.push_str(" AND school_id = ?");
        }

        let count_sql = format!("SELECT COUNT(*) FROM gafan_programs{where_clause}");
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        if let Some(search) = &filters.search {
            count_query = count_query.bind(format!("%{search}%"));
        }
        if let Some(school_id) = filters.school_id {
            count_query = count_query.bind(school_id);
        }
        let total = count_query.fetch_one(pool).await?;

        let list_sql = format!(
            "SELECT {GAFAN_COLUMNS} FROM gafan_programs{where_clause} ORDER BY starts_on DESC, name ASC LIMIT ? OFFSET ?"
        );
        let mut list_query = sqlx::query_as::<_, GafanProgram>(&list_sql);
        if let Some(search) = &filters.search {
            list_query = list_query.bind(format!("%{search}%"));
        }
        if let Some(school_id) = filters.school_id {
            list_query = list_query.bind(school_id);
        }
        let data = list_query
            .bind(filters.pagination.limit())
            .bind(filters.pagination.offset())
            .fetch_all(pool)
            .await?;

        let meta = filters.pagination.meta(data.len(), total);
        Ok(PaginatedGafanResponse { data, meta })
    }

    #[instrument(skip(pool))]
    pub async fn get_program(pool: &SqlitePool, id: Uuid) -> Result<GafanProgram, AppError> {
        let sql = format!("SELECT {GAFAN_COLUMNS} FROM gafan_programs WHERE id = ?");
        sqlx::query_as::<_, GafanProgram>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Gafan program not found")))
    }

    #[instrument(skip(pool, dto))]
    pub async fn update_program(
        pool: &SqlitePool,
        id: Uuid,
        dto: UpdateGafanProgramDto,
    ) -> Result<GafanProgram, AppError> {
        let existing = Self::get_program(pool, id).await?;

        sqlx::query(
            "UPDATE gafan_programs SET name = ?, school_id = ?, starts_on = ?, ends_on = ?, notes = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(dto.name.unwrap_or(existing.name))
        .bind(dto.school_id.or(existing.school_id))
        .bind(dto.starts_on.or(existing.starts_on))
        .bind(dto.ends_on.or(existing.ends_on))
        .bind(dto.notes.or(existing.notes))
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await?;

        Self::get_program(pool, id).await
    }

    #[instrument(skip(pool))]
    pub async fn delete_program(pool: &SqlitePool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM gafan_programs WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Gafan program not found")));
        }
        Ok(())
    }
}
