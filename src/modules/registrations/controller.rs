use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::{
    RequireRegistrationsCreate, RequireRegistrationsDelete, RequireRegistrationsRead,
    RequireRegistrationsUpdate,
};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::registrations::model::{
    CreateRegistrationDto, PaginatedRegistrationsResponse, Registration,
    RegistrationFilterParams, UpdateRegistrationDto,
};
use crate::modules::registrations::service::RegistrationService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/registrations",
    request_body = CreateRegistrationDto,
    responses(
        (status = 200, description = "Registration created", body = Registration),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Student or course not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Registrations"
)]
#[instrument(skip(state, dto))]
pub async fn create_registration(
    State(state): State<AppState>,
    RequireRegistrationsCreate(_auth): RequireRegistrationsCreate,
    ValidatedJson(dto): ValidatedJson<CreateRegistrationDto>,
) -> Result<Json<Registration>, AppError> {
    let registration = RegistrationService::create_registration(&state.db, dto).await?;
    Ok(Json(registration))
}

#[utoipa::path(
    get,
    path = "/api/registrations",
    params(
        ("student_id" = Option<Uuid>, Query, description = "Restrict to one student"),
        ("course_id" = Option<Uuid>, Query, description = "Restrict to one course"),
        ("status" = Option<String>, Query, description = "pending, confirmed or cancelled"),
        ("limit" = Option<i64>, Query, description = "Items per page (1-100)"),
        ("page" = Option<i64>, Query, description = "Page number (1-indexed)")
    ),
    responses(
        (status = 200, description = "List of registrations", body = PaginatedRegistrationsResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Registrations"
)]
#[instrument(skip(state))]
pub async fn get_registrations(
    State(state): State<AppState>,
    RequireRegistrationsRead(_auth): RequireRegistrationsRead,
    Query(params): Query<RegistrationFilterParams>,
) -> Result<Json<PaginatedRegistrationsResponse>, AppError> {
    let response = RegistrationService::get_registrations(&state.db, params).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/registrations/{id}",
    params(("id" = Uuid, Path, description = "Registration ID")),
    responses(
        (status = 200, description = "Registration details", body = Registration),
        (status = 404, description = "Registration not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Registrations"
)]
#[instrument(skip(state))]
pub async fn get_registration(
    State(state): State<AppState>,
    RequireRegistrationsRead(_auth): RequireRegistrationsRead,
    Path(id): Path<Uuid>,
) -> Result<Json<Registration>, AppError> {
    let registration = RegistrationService::get_registration(&state.db, id).await?;
    Ok(Json(registration))
}

#[utoipa::path(
    put,
    path = "/api/registrations/{id}",
    params(("id" = Uuid, Path, description = "Registration ID")),
    request_body = UpdateRegistrationDto,
    responses(
        (status = 200, description = "Registration updated", body = Registration),
        (status = 404, description = "Registration not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Registrations"
)]
#[instrument(skip(state, dto))]
pub async fn update_registration(
    State(state): State<AppState>,
    RequireRegistrationsUpdate(_auth): RequireRegistrationsUpdate,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateRegistrationDto>,
) -> Result<Json<Registration>, AppError> {
    let registration = RegistrationService::update_registration(&state.db, id, dto).await?;
    Ok(Json(registration))
}

#[utoipa::path(
    delete,
    path = "/api/registrations/{id}",
    params(("id" = Uuid, Path, description = "Registration ID")),
    responses(
        (status = 200, description = "Registration deleted"),
        (status = 404, description = "Registration not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Registrations"
)]
#[instrument(skip(state))]
pub async fn delete_registration(
    State(state): State<AppState>,
    RequireRegistrationsDelete(_auth): RequireRegistrationsDelete,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    RegistrationService::delete_registration(&state.db, id).await?;
    Ok(Json(json!({ "message": "Registration deleted successfully" })))
}
