use anyhow::anyhow;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{CreateEventDto, EventFilterParams, ScheduleEvent, UpdateEventDto};

const EVENT_COLUMNS: &str =
    "id, title, course_id, teacher_id, location, starts_at, ends_at, created_at, updated_at";

pub struct ScheduleService;

impl ScheduleService {
    #[instrument(skip(pool, dto))]
    pub async fn create_event(pool: &SqlitePool, dto: CreateEventDto) -> Result<ScheduleEvent, AppError> {
        if dto.ends_at <= dto.starts_at {
            return Err(AppError::bad_request(anyhow!(
                "ends_at must be after starts_at"
            )));
        }

        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO schedule_events (id, title, course_id, teacher_id, location, starts_at, ends_at, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(&dto.title)
        .bind(dto.course_id)
        .bind(dto.teacher_id)
        .bind(&dto.location)
        .bind(dto.starts_at)
        .bind(dto.ends_at)
        .bind(now)
        .bind(now)
        .execute(pool)
        .await?;

        Self::get_event(pool, id).await
    }

    /// Events overlapping the requested window, soonest first.
    #[instrument(skip(pool))]
    pub async fn get_events(
        pool: &SqlitePool,
        filters: EventFilterParams,
    ) -> Result<Vec<ScheduleEvent>, AppError> {
        let mut where_clause = String::from(" WHERE 1=1");
        if filters.from.is_some() {
            where_clause.push_str(" AND ends_at >= ?");
        }
        if filters.to.is_some() {
            where_clause.push_str(" AND starts_at <= ?");
        }
        if filters.course_id.is_some() {
            where_clause.push_str(" AND course_id = ?");
        }
        if filters.teacher_id.is_some() {
            where_clause.push_str(" AND teacher_id = ?");
        }

        let sql = format!(
            "SELECT {EVENT_COLUMNS} FROM schedule_events{where_clause} ORDER BY starts_at ASC"
        );
        let mut query = sqlx::query_as::<_, ScheduleEvent>(&sql);
        if let Some(from) = filters.from {
            query = query.bind(from);
        }
        if let Some(to) = filters.to {
            query = query.bind(to);
        }
        if let Some(course_id) = filters.course_id {
            query = query.bind(course_id);
        }
        if let Some(teacher_id) = filters.teacher_id {
            query = query.bind(teacher_id);
        }

        Ok(query.fetch_all(pool).await?)
    }

    #[instrument(skip(pool))]
    pub async fn get_event(pool: &SqlitePool, id: Uuid) -> Result<ScheduleEvent, AppError> {
        let sql = format!("SELECT {EVENT_COLUMNS} FROM schedule_events WHERE id = ?");
        sqlx::query_as::<_, ScheduleEvent>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Event not found")))
    }

    #[instrument(skip(pool, dto))]
    pub async fn update_event(
        pool: &SqlitePool,
        id: Uuid,
        dto: UpdateEventDto,
    ) -> Result<ScheduleEvent, AppError> {
        let existing = Self::get_event(pool, id).await?;

        let starts_at = dto.starts_at.unwrap_or(existing.starts_at);
        let ends_at = dto.ends_at.unwrap_or(existing.ends_at);
        if ends_at <= starts_at {
            return Err(AppError::bad_request(anyhow!(
                "ends_at must be after starts_at"
            )));
        }

        sqlx::query(
            "UPDATE schedule_events SET title = ?, course_id = ?, teacher_id = ?, location = ?, starts_at = ?, ends_at = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(dto.title.unwrap_or(existing.title))
        .bind(dto.course_id.or(existing.course_id))
        .bind(dto.teacher_id.or(existing.teacher_id))
        .bind(dto.location.or(existing.location))
        .bind(starts_at)
        .bind(ends_at)
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await?;

        Self::get_event(pool, id).await
    }

    #[instrument(skip(pool))]
    pub async fn delete_event(pool: &SqlitePool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM schedule_events WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Event not found")));
        }
        Ok(())
    }
}
