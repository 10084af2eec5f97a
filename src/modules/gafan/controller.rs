use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::{
    RequireGafanCreate, RequireGafanDelete, RequireGafanRead, RequireGafanUpdate,
};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::gafan::model::{
    CreateGafanProgramDto, GafanFilterParams, GafanProgram, PaginatedGafanResponse,
    UpdateGafanProgramDto,
};
use crate::modules::gafan::service::GafanService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/gafan",
    request_body = CreateGafanProgramDto,
    responses(
        (status = 200, description = "Program created", body = GafanProgram),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Gafan"
)]
#[instrument(skip(state, dto))]
pub async fn create_program(
    State(state): State<AppState>,
    RequireGafanCreate(_auth): RequireGafanCreate,
    ValidatedJson(dto): ValidatedJson<CreateGafanProgramDto>,
) -> Result<Json<GafanProgram>, AppError> {
    let program = GafanService::create_program(&state.db, dto).await?;
    Ok(Json(program))
}

#[utoipa::path(
    get,
    path = "/api/gafan",
    params(
        ("search" = Option<String>, Query, description = "Match against program name"),
        ("school_id" = Option<Uuid>, Query, description = "Restrict to one partner school"),
        ("limit" = Option<i64>, Query, description = "Items per page (1-100)"),
        ("page" = Option<i64>, Query, description = "Page number (1-indexed)")
    ),
    responses(
        (status = 200, description = "List of programs", body = PaginatedGafanResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Gafan"
)]
#[instrument(skip(state))]
pub async fn get_programs(
    State(state): State<AppState>,
    RequireGafanRead(_auth): RequireGafanRead,
    Query(params): Query<GafanFilterParams>,
) -> Result<Json<PaginatedGafanResponse>, AppError> {
    let response = GafanService::get_programs(&state.db, params).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/gafan/{id}",
    params(("id" = Uuid, Path, description = "Program ID")),
    responses(
        (status = 200, description = "Program details", body = GafanProgram),
        (status = 404, description = "Program not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Gafan"
)]
#[instrument(skip(state))]
pub async fn get_program(
    State(state): State<AppState>,
    RequireGafanRead(_auth): RequireGafanRead,
    Path(id): Path<Uuid>,
) -> Result<Json<GafanProgram>, AppError> {
    let program = GafanService::get_program(&state.db, id).await?;
    Ok(Json(program))
}

#[utoipa::path(
    put,
    path = "/api/gafan/{id}",
    params(("id" = Uuid, Path, description = "Program ID")),
    request_body = UpdateGafanProgramDto,
    responses(
        (status = 200, description = "Program updated", body = GafanProgram),
        (status = 404, description = "Program not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Gafan"
)]
#[instrument(skip(state, dto))]
pub async fn update_program(
    State(state): State<AppState>,
    RequireGafanUpdate(_auth): RequireGafanUpdate,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateGafanProgramDto>,
) -> Result<Json<GafanProgram>, AppError> {
    let program = GafanService::update_program(&state.db, id, dto).await?;
    Ok(Json(program))
}

#[utoipa::path(
    delete,
    path = "/api/gafan/{id}",
    params(("id" = Uuid, Path, description = "Program ID")),
    responses(
        (status = 200, description = "Program deleted"),
        (status = 404, description = "Program not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Gafan"
)]
#[instrument(skip(state))]
pub async fn delete_program(
    State(state): State<AppState>,
    RequireGafanDelete(_auth): RequireGafanDelete,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    GafanService::delete_program(&state.db, id).await?;
    Ok(Json(json!({ "message": "Gafan program deleted successfully" })))
}
