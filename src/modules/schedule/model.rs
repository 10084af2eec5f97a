use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ScheduleEvent {
    pub id: Uuid,
    pub title: String,
    pub course_id: Option<Uuid>,
    pub teacher_id: Option<Uuid>,
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEventDto {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    pub course_id: Option<Uuid>,
    pub teacher_id: Option<Uuid>,
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEventDto {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
    pub course_id: Option<Uuid>,
    pub teacher_id: Option<Uuid>,
    pub location: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct EventFilterParams {
    /// Events ending at or after this instant.
    pub from: Option<DateTime<Utc>>,
    /// Events starting at or before this instant.
    pub to: Option<DateTime<Utc>>,
    pub course_id: Option<Uuid>,
    pub teacher_id: Option<Uuid>,
}
