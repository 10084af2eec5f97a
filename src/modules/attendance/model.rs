use chrono::{DateTime, NaiveDate, Utc};
use robokademi_core::{AttendanceStatus, SubjectKind};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// One stored attendance mark. Uniquely keyed by
/// `(subject_id, date, person_id)`; re-marking overwrites the status.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AttendanceMark {
    pub subject_kind: String,
    pub subject_id: Uuid,
    pub date: NaiveDate,
    pub person_id: Uuid,
    pub status: String,
    pub marked_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct MarkAttendanceDto {
    pub subject_kind: SubjectKind,
    pub subject_id: Uuid,
    pub date: NaiveDate,
    pub person_id: Uuid,
    pub status: AttendanceStatus,
}

/// Outcome of one mark: the stored mark plus what the session ledger
/// did with it.
#[derive(Debug, Serialize, ToSchema)]
pub struct MarkAttendanceResponse {
    pub mark: AttendanceMark,
    /// Status previously recorded for the same key, if any.
    pub prior_status: Option<String>,
    /// Whether this mark debited a session from the enrollment balance.
    pub session_debited: bool,
    /// Balance after the mark, for course subjects with an enrollment.
    pub sessions_remaining: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct MarkFilterParams {
    pub subject_id: Uuid,
    /// All dates for the subject when omitted.
    pub date: Option<NaiveDate>,
}

/// One row of a course attendance sheet: the enrolled student, their
/// status for the requested date (if marked), and the live balance.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct CourseSheetRow {
    pub person_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub sessions_remaining: i64,
    pub status: Option<String>,
}
