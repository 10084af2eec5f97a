use anyhow::anyhow;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::courses::service::CourseService;
use crate::modules::students::service::StudentService;
use crate::utils::errors::AppError;

use super::model::{
    CreateRegistrationDto, PaginatedRegistrationsResponse, Registration, RegistrationFilterParams,
    RegistrationStatus, UpdateRegistrationDto,
};

const REGISTRATION_COLUMNS: &str =
    "id, student_id, course_id, registered_on, status, notes, created_at, updated_at";

pub struct RegistrationService;

impl RegistrationService {
    #[instrument(skip(pool, dto))]
    pub async fn create_registration(
        pool: &SqlitePool,
        dto: CreateRegistrationDto,
    ) -> Result<Registration, AppError> {
        // Both sides must exist so the record never dangles.
        StudentService::get_student_by_id(pool, dto.student_id).await?;
        CourseService::get_course(pool, dto.course_id).await?;

        let id = Uuid::new_v4();
        let now = Utc::now();
        let registered_on = dto.registered_on.unwrap_or_else(|| now.date_naive());
        let status = dto.status.unwrap_or(RegistrationStatus::Pending);

        sqlx::query(
            "INSERT INTO registrations (id, student_id, course_id, registered_on, status, notes, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(dto.student_id)
        .bind(dto.course_id)
        .bind(registered_on)
        .bind(status.as_str())
        .bind(&dto.notes)
        .bind(now)
        .bind(now)
        .execute(pool)
        .await?;

        Self::get_registration(pool, id).await
    }

    #[instrument(skip(pool))]
    pub async fn get_registrations(
        pool: &SqlitePool,
        filters: RegistrationFilterParams,
    ) -> Result<PaginatedRegistrationsResponse, AppError> {
        let mut where_clause = String::from(" WHERE 1=1");
        if filters.student_id.is_some() {
            where_clause.push_str(" AND student_id = ?");
        }
        if filters.course_id.is_some() {
            where_clause.push_str(" AND course_id = ?");
        }
        if filters.status.is_some() {
            where_clause.push_str(" AND status = ?");
        }

        let count_sql = format!("SELECT COUNT(*) FROM registrations{where_clause}");
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        if let Some(student_id) = filters.student_id {
            count_query = count_query.bind(student_id);
        }
        if let Some(course_id) = filters.course_id {
            count_query = count_query.bind(course_id);
        }
        if let Some(status) = filters.status {
            count_query = count_query.bind(status.as_str());
        }
        let total = count_query.fetch_one(pool).await?;

        let list_sql = format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations{where_clause} ORDER BY registered_on DESC LIMIT ? OFFSET ?"
        );
        let mut list_query = sqlx::query_as::<_, Registration>(&list_sql);
        if let Some(student_id) = filters.student_id {
            list_query = list_query.bind(student_id);
        }
        if let Some(course_id) = filters.course_id {
            list_query = list_query.bind(course_id);
        }
        if let Some(status) = filters.status {
            list_query = list_query.bind(status.as_str());
        }
        let data = list_query
            .bind(filters.pagination.limit())
            .bind(filters.pagination.offset())
            .fetch_all(pool)
            .await?;

        let meta = filters.pagination.meta(data.len(), total);
        Ok(PaginatedRegistrationsResponse { data, meta })
    }

    #[instrument(skip(pool))]
    pub async fn get_registration(pool: &SqlitePool, id: Uuid) -> Result<Registration, AppError> {
        let sql = format!("SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE id = ?");
        sqlx::query_as::<_, Registration>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Registration not found")))
    }

    #[instrument(skip(pool, dto))]
    pub async fn update_registration(
        pool: &SqlitePool,
        id: Uuid,
        dto: UpdateRegistrationDto,
    ) -> Result<Registration, AppError> {
        let existing = Self::get_registration(pool, id).await?;

        sqlx::query(
            "UPDATE registrations SET registered_on = ?, status = ?, notes = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(dto.registered_on.unwrap_or(existing.registered_on))
        .bind(dto.status.map(|s| s.as_str().to_string()).unwrap_or(existing.status))
        .bind(dto.notes.or(existing.notes))
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await?;

        Self::get_registration(pool, id).await
    }

    #[instrument(skip(pool))]
    pub async fn delete_registration(pool: &SqlitePool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM registrations WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Registration not found")));
        }
        Ok(())
    }
}
