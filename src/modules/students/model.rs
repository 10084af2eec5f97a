use chrono::{DateTime, Utc};
use robokademi_core::PaginationMeta;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Student {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub guardian_name: Option<String>,
    pub school_id: Option<Uuid>,
    /// Per-student override for the session balance a new enrollment
    /// starts from. When unset, enrollments use the course's default.
    pub total_sessions: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateStudentDto {
    #[validate(length(min = 1, message = "first_name must not be empty"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "last_name must not be empty"))]
    pub last_name: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub guardian_name: Option<String>,
    pub school_id: Option<Uuid>,
    #[validate(range(min = 0, message = "total_sessions must not be negative"))]
    pub total_sessions: Option<i64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStudentDto {
    #[validate(length(min = 1, message = "first_name must not be empty"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, message = "last_name must not be empty"))]
    pub last_name: Option<String>,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub guardian_name: Option<String>,
    pub school_id: Option<Uuid>,
    #[validate(range(min = 0, message = "total_sessions must not be negative"))]
    pub total_sessions: Option<i64>,
}

/// A student's enrollment in one course, carrying the remaining-session
/// balance the attendance ledger debits.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Enrollment {
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub sessions_remaining: i64,
    pub enrolled_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct EnrollmentWithCourse {
    pub course_id: Uuid,
    pub course_name: String,
    pub sessions_remaining: i64,
    pub enrolled_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct EnrollStudentDto {
    pub course_id: Uuid,
    /// Overrides both the student's total-session setting and the
    /// course's default when present.
    #[validate(range(min = 0, message = "sessions must not be negative"))]
    pub sessions: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct StudentFilterParams {
    /// Matches against first name, last name, or guardian name
    pub search: Option<String>,
    pub school_id: Option<Uuid>,
    #[serde(flatten)]
    pub pagination: robokademi_core::PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedStudentsResponse {
    pub data: Vec<Student>,
    pub meta: PaginationMeta,
}
