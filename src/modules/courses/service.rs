use anyhow::anyhow;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{
    Course, CourseFilterParams, CreateCourseDto, PaginatedCoursesResponse, UpdateCourseDto,
};

const COURSE_COLUMNS: &str =
    "id, name, description, level, school_id, teacher_id, default_sessions, created_at, updated_at";

pub struct CourseService;

impl CourseService {
    #[instrument(skip(pool, dto))]
    pub async fn create_course(pool: &SqlitePool, dto: CreateCourseDto) -> Result<Course, AppError> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO courses (id, name, description, level, school_id, teacher_id, default_sessions, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(&dto.level)
        .bind(dto.school_id)
        .bind(dto.teacher_id)
        .bind(dto.default_sessions.unwrap_or(12))
        .bind(now)
        .bind(now)
        .execute(pool)
        .await?;

        Self::get_course(pool, id).await
    }

    #[instrument(skip(pool))]
    pub async fn get_courses(
        pool: &SqlitePool,
        filters: CourseFilterParams,
    ) -> Result<PaginatedCoursesResponse, AppError> {
        let mut where_clause = String::from(" WHERE 1=1");
        if filters.search.is_some() {
            where_clause.push_str(" AND (name LIKE ? OR level LIKE ?)");
        }
        if filters.school_id.is_some() {
            where_clause.push_str(" AND school_id = ?");
        }
        if filters.teacher_id.is_some() {
            where_clause.push_str(" AND teacher_id = ?");
        }

        let count_sql = format!("SELECT COUNT(*) FROM courses{where_clause}");
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        if let Some(search) = &filters.search {
            let pattern = format!("%{search}%");
            count_query = count_query.bind(pattern.clone()).bind(pattern);
        }
        if let Some(school_id) = filters.school_id {
            count_query = count_query.bind(school_id);
        }
        if let Some(teacher_id) = filters.teacher_id {
            count_query = count_query.bind(teacher_id);
        }
        let total = count_query.fetch_one(pool).await?;

        let list_sql = format!(
            "SELECT {COURSE_COLUMNS} FROM courses{where_clause} ORDER BY name ASC LIMIT ? OFFSET ?"
        );
        let mut list_query = sqlx::query_as::<_, Course>(&list_sql);
        if let Some(search) = &filters.search {
            let pattern = format!("%{search}%");
            list_query = list_query.bind(pattern.clone()).bind(pattern);
        }
        if let Some(school_id) = filters.school_id {
            list_query = list_query.bind(school_id);
        }
        if let Some(teacher_id) = filters.teacher_id {
            list_query = list_query.bind(teacher_id);
        }
        let data = list_query
            .bind(filters.pagination.limit())
            .bind(filters.pagination.offset())
            .fetch_all(pool)
            .await?;

        let meta = filters.pagination.meta(data.len(), total);
        Ok(PaginatedCoursesResponse { data, meta })
    }

    #[instrument(skip(pool))]
    pub async fn get_course(pool: &SqlitePool, id: Uuid) -> Result<Course, AppError> {
        let sql = format!("SELECT {COURSE_COLUMNS} FROM courses WHERE id = ?");
        sqlx::query_as::<_, Course>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Course not found")))
    }

    #[instrument(skip(pool, dto))]
    pub async fn update_course(
        pool: &SqlitePool,
        id: Uuid,
        dto: UpdateCourseDto,
    ) -> Result<Course, AppError> {
        let existing = Self::get_course(pool, id).await?;

        sqlx::query(
            "UPDATE courses SET name = ?, description = ?, level = ?, school_id = ?, teacher_id = ?, default_sessions = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(dto.name.unwrap_or(existing.name))
        .bind(dto.description.or(existing.description))
        .bind(dto.level.or(existing.level))
        .bind(dto.school_id.or(existing.school_id))
        .bind(dto.teacher_id.or(existing.teacher_id))
        .bind(dto.default_sessions.unwrap_or(existing.default_sessions))
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await?;

        Self::get_course(pool, id).await
    }

    #[instrument(skip(pool))]
    pub async fn delete_course(pool: &SqlitePool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Course not found")));
        }
        Ok(())
    }
}
