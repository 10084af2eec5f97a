use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::NaiveDate;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::{RequireAttendanceEdit, RequireAttendanceRead};
use crate::modules::attendance::model::{
    AttendanceMark, CourseSheetRow, MarkAttendanceDto, MarkAttendanceResponse, MarkFilterParams,
};
use crate::modules::attendance::service::AttendanceService;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[utoipa::path(
    put,
    path = "/api/attendance/marks",
    request_body = MarkAttendanceDto,
    responses(
        (status = 200, description = "Mark recorded; response reports whether a session was debited", body = MarkAttendanceResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 409, description = "Person not enrolled (reject policy)", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state, dto))]
pub async fn mark_attendance(
    State(state): State<AppState>,
    RequireAttendanceEdit(_auth): RequireAttendanceEdit,
    ValidatedJson(dto): ValidatedJson<MarkAttendanceDto>,
) -> Result<Json<MarkAttendanceResponse>, AppError> {
    let response =
        AttendanceService::mark(&state.db, dto, state.attendance_config.unenrolled).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/attendance/marks",
    params(
        ("subject_id" = Uuid, Query, description = "Subject (course, teacher, or student sheet)"),
        ("date" = Option<NaiveDate>, Query, description = "Restrict to one date")
    ),
    responses(
        (status = 200, description = "Marks for the subject", body = Vec<AttendanceMark>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn get_marks(
    State(state): State<AppState>,
    RequireAttendanceRead(_auth): RequireAttendanceRead,
    Query(params): Query<MarkFilterParams>,
) -> Result<Json<Vec<AttendanceMark>>, AppError> {
    let marks = AttendanceService::get_marks(&state.db, params.subject_id, params.date).await?;
    Ok(Json(marks))
}

#[utoipa::path(
    get,
    path = "/api/attendance/courses/{course_id}/sheet/{date}",
    params(
        ("course_id" = Uuid, Path, description = "Course ID"),
        ("date" = NaiveDate, Path, description = "Sheet date")
    ),
    responses(
        (status = 200, description = "Enrolled students with balances and the day's statuses", body = Vec<CourseSheetRow>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn get_course_sheet(
    State(state): State<AppState>,
    RequireAttendanceRead(_auth): RequireAttendanceRead,
    Path((course_id, date)): Path<(Uuid, NaiveDate)>,
) -> Result<Json<Vec<CourseSheetRow>>, AppError> {
    let rows = AttendanceService::course_sheet(&state.db, course_id, date).await?;
    Ok(Json(rows))
}
