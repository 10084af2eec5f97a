use anyhow::anyhow;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{
    CreateTeacherDto, PaginatedTeachersResponse, Teacher, TeacherFilterParams, UpdateTeacherDto,
};

const TEACHER_COLUMNS: &str =
    "id, first_name, last_name, email, phone, specialty, school_id, created_at, updated_at";

pub struct TeacherService;

impl TeacherService {
    #[instrument(skip(pool, dto))]
    pub async fn create_teacher(pool: &SqlitePool, dto: CreateTeacherDto) -> Result<Teacher, AppError> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO teachers (id, first_name, last_name, email, phone, specialty, school_id, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(&dto.email)
        .bind(&dto.phone)
        .bind(&dto.specialty)
        .bind(dto.school_id)
        .bind(now)
        .bind(now)
        .execute(pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::bad_request(anyhow!("A teacher with that email already exists"));
                }
            }
            AppError::from(e)
        })?;

        Self::get_teacher(pool, id).await
    }

    #[instrument(skip(pool))]
    pub async fn get_teachers(
        pool: &SqlitePool,
        filters: TeacherFilterParams,
    ) -> Result<PaginatedTeachersResponse, AppError> {
        let mut where_clause = String::from(" WHERE 1=1");
        if filters.search.is_some() {
            where_clause.push_str(" AND (first_name LIKE ? OR last_name LIKE ? OR specialty LIKE ?)");
        }
        if filters.school_id.is_some() {
            where_clause.push_str(" AND school_id = ?");
        }

        let count_sql = format!("SELECT COUNT(*) FROM teachers{where_clause}");
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        if let Some(search) = &filters.search {
            let pattern = format!("%{search}%");
            count_query = count_query
                .bind(pattern.clone())
                .bind(pattern.clone())
                .bind(pattern);
        }
        if let Some(school_id) = filters.school_id {
            count_query = count_query.bind(school_id);
        }
        let total = count_query.fetch_one(pool).await?;

        let list_sql = format!(
            "SELECT {TEACHER_COLUMNS} FROM teachers{where_clause} ORDER BY last_name ASC, first_name ASC LIMIT ? OFFSET ?"
        );
        let mut list_query = sqlx::query_as::<_, Teacher>(&list_sql);
        if let Some(search) = &filters.search {
            let pattern = format!("%{search}%");
            list_query = list_query
                .bind(pattern.clone())
                .bind(pattern.clone())
                .bind(pattern);
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
        Ok(PaginatedTeachersResponse { data, meta })
    }

    #[instrument(skip(pool))]
    pub async fn get_teacher(pool: &SqlitePool, id: Uuid) -> Result<Teacher, AppError> {
        let sql = format!("SELECT {TEACHER_COLUMNS} FROM teachers WHERE id = ?");
        sqlx::query_as::<_, Teacher>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Teacher not found")))
    }

    #[instrument(skip(pool, dto))]
    pub async fn update_teacher(
        pool: &SqlitePool,
        id: Uuid,
        dto: UpdateTeacherDto,
    ) -> Result<Teacher, AppError> {
        let existing = Self::get_teacher(pool, id).await?;

        sqlx::query(
            "UPDATE teachers SET first_name = ?, last_name = ?, email = ?, phone = ?, specialty = ?, school_id = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(dto.first_name.unwrap_or(existing.first_name))
        .bind(dto.last_name.unwrap_or(existing.last_name))
        .bind(dto.email.or(existing.email))
        .bind(dto.phone.or(existing.phone))
        .bind(dto.specialty.or(existing.specialty))
        .bind(dto.school_id.or(existing.school_id))
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::bad_request(anyhow!("A teacher with that email already exists"));
                }
            }
            AppError::from(e)
        })?;

        Self::get_teacher(pool, id).await
    }

    #[instrument(skip(pool))]
    pub async fn delete_teacher(pool: &SqlitePool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM teachers WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Teacher not found")));
        }
        Ok(())
    }
}
