use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::{
    RequireScheduleCreate, RequireScheduleDelete, RequireScheduleRead, RequireScheduleUpdate,
};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::schedule::model::{
    CreateEventDto, EventFilterParams, ScheduleEvent, UpdateEventDto,
};
use crate::modules::schedule::service::ScheduleService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/schedule/events",
    request_body = CreateEventDto,
    responses(
        (status = 200, description = "Event created", body = ScheduleEvent),
        (status = 400, description = "Invalid time range", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Schedule"
)]
#[instrument(skip(state, dto))]
pub async fn create_event(
    State(state): State<AppState>,
    RequireScheduleCreate(_auth): RequireScheduleCreate,
    ValidatedJson(dto): ValidatedJson<CreateEventDto>,
) -> Result<Json<ScheduleEvent>, AppError> {
    let event = ScheduleService::create_event(&state.db, dto).await?;
    Ok(Json(event))
}

#[utoipa::path(
    get,
    path = "/api/schedule/events",
    params(
        ("from" = Option<String>, Query, description = "Include events ending at or after this instant (RFC 3339)"),
        ("to" = Option<String>, Query, description = "Include events starting at or before this instant (RFC 3339)"),
        ("course_id" = Option<Uuid>, Query, description = "Restrict to one course"),
        ("teacher_id" = Option<Uuid>, Query, description = "Restrict to one teacher")
    ),
    responses(
        (status = 200, description = "Events overlapping the window", body = Vec<ScheduleEvent>),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Schedule"
)]
#[instrument(skip(state))]
pub async fn get_events(
    State(state): State<AppState>,
    RequireScheduleRead(_auth): RequireScheduleRead,
    Query(params): Query<EventFilterParams>,
) -> Result<Json<Vec<ScheduleEvent>>, AppError> {
    let events = ScheduleService::get_events(&state.db, params).await?;
    Ok(Json(events))
}

#[utoipa::path(
    get,
    path = "/api/schedule/events/{id}",
    params(("id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event details", body = ScheduleEvent),
        (status = 404, description = "Event not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Schedule"
)]
#[instrument(skip(state))]
pub async fn get_event(
    State(state): State<AppState>,
    RequireScheduleRead(_auth): RequireScheduleRead,
    Path(id): Path<Uuid>,
) -> Result<Json<ScheduleEvent>, AppError> {
    let event = ScheduleService::get_event(&state.db, id).await?;
    Ok(Json(event))
}

#[utoipa::path(
    put,
    path = "/api/schedule/events/{id}",
    params(("id" = Uuid, Path, description = "Event ID")),
    request_body = UpdateEventDto,
    responses(
        (status = 200, description = "Event updated", body = ScheduleEvent),
        (status = 404, description = "Event not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Schedule"
)]
#[instrument(skip(state, dto))]
pub async fn update_event(
    State(state): State<AppState>,
    RequireScheduleUpdate(_auth): RequireScheduleUpdate,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateEventDto>,
) -> Result<Json<ScheduleEvent>, AppError> {
    let event = ScheduleService::update_event(&state.db, id, dto).await?;
    Ok(Json(event))
}

#[utoipa::path(
    delete,
    path = "/api/schedule/events/{id}",
    params(("id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event deleted"),
        (status = 404, description = "Event not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Schedule"
)]
#[instrument(skip(state))]
pub async fn delete_event(
    State(state): State<AppState>,
    RequireScheduleDelete(_auth): RequireScheduleDelete,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    ScheduleService::delete_event(&state.db, id).await?;
    Ok(Json(json!({ "message": "Event deleted successfully" })))
}
