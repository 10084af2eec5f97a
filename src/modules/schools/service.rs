use anyhow::anyhow;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{CreateSchoolDto, PaginatedSchoolsResponse, School, SchoolFilterParams, UpdateSchoolDto};

const SCHOOL_COLUMNS: &str = "id, name, city, address, contact_name, contact_phone, created_at, updated_at";

pub struct SchoolService;

impl SchoolService {
    #[instrument(skip(pool, dto))]
    pub async fn create_school(pool: &SqlitePool, dto: CreateSchoolDto) -> Result<School, AppError> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO schools (id, name, city, address, contact_name, contact_phone, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(&dto.name)
        .bind(&dto.city)
        .bind(&dto.address)
        .bind(&dto.contact_name)
        .bind(&dto.contact_phone)
        .bind(now)
        .bind(now)
        .execute(pool)
        .await?;

        Self::get_school(pool, id).await
    }

    #[instrument(skip(pool))]
    pub async fn get_schools(
        pool: &SqlitePool,
        filters: SchoolFilterParams,
    ) -> Result<PaginatedSchoolsResponse, AppError> {
        let mut where_clause = String::from(" WHERE 1=1");
        if filters.search.is_some() {
            where_clause.push_str(" AND (name LIKE ? OR city LIKE ?)");
        }

        let count_sql = format!("SELECT COUNT(*) FROM schools{where_clause}");
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        if let Some(search) = &filters.search {
            let pattern = format!("%{search}%");
            count_query = count_query.bind(pattern.clone()).bind(pattern);
        }
        let total = count_query.fetch_one(pool).await?;

        let list_sql = format!(
            "SELECT {SCHOOL_COLUMNS} FROM schools{where_clause} ORDER BY name ASC LIMIT ? OFFSET ?"
        );
        let mut list_query = sqlx::query_as::<_, School>(&list_sql);
        if let Some(search) = &filters.search {
            let pattern = format!("%{search}%");
            list_query = list_query.bind(pattern.clone()).bind(pattern);
        }
        let data = list_query
            .bind(filters.pagination.limit())
            .bind(filters.pagination.offset())
            .fetch_all(pool)
            .await?;

        let meta = filters.pagination.meta(data.len(), total);
        Ok(PaginatedSchoolsResponse { data, meta })
    }

    #[instrument(skip(pool))]
    pub async fn get_school(pool: &SqlitePool, id: Uuid) -> Result<School, AppError> {
        let sql = format!("SELECT {SCHOOL_COLUMNS} FROM schools WHERE id = ?");
        sqlx::query_as::<_, School>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("School not found")))
    }

    #[instrument(skip(pool, dto))]
    pub async fn update_school(pool: &SqlitePool, id: Uuid, dto: UpdateSchoolDto) -> Result<School, AppError> {
        let existing = Self::get_school(pool, id).await?;

        sqlx::query(
            "UPDATE schools SET name = ?, city = ?, address = ?, contact_name = ?, contact_phone = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(dto.name.unwrap_or(existing.name))
        .bind(dto.city.or(existing.city))
        .bind(dto.address.or(existing.address))
        .bind(dto.contact_name.or(existing.contact_name))
        .bind(dto.contact_phone.or(existing.contact_phone))
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await?;

        Self::get_school(pool, id).await
    }

    #[instrument(skip(pool))]
    pub async fn delete_school(pool: &SqlitePool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM schools WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("School not found")));
        }
        Ok(())
    }
}
