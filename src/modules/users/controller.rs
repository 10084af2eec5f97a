use axum::{
    Json,
    extract::{Path, Query, State},
};
use robokademi_core::Role;
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::{
    RequireUsersCreate, RequireUsersDelete, RequireUsersEditPermissions, RequireUsersRead,
    RequireUsersUpdate,
};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::users::model::{
    CreateUserDto, PaginatedUsersResponse, PermissionCategoryGroup, UpdatePermissionsDto,
    UpdateUserDto, User, UserFilterParams, UserWithPermissions,
};
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserDto,
    responses(
        (status = 200, description = "User created with role-default permissions", body = UserWithPermissions),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn create_user(
    State(state): State<AppState>,
    RequireUsersCreate(_auth): RequireUsersCreate,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<Json<UserWithPermissions>, AppError> {
    let user = UserService::create_user(&state.db, dto).await?;
    Ok(Json(user))
}

#[utoipa::path(
    get,
    path = "/api/users",
    params(
        ("search" = Option<String>, Query, description = "Match against name or email"),
        ("role" = Option<String>, Query, description = "Restrict to one role"),
        ("limit" = Option<i64>, Query, description = "Items per page (1-100)"),
        ("page" = Option<i64>, Query, description = "Page number (1-indexed)")
    ),
    responses(
        (status = 200, description = "List of users", body = PaginatedUsersResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_users(
    State(state): State<AppState>,
    RequireUsersRead(_auth): RequireUsersRead,
    Query(params): Query<UserFilterParams>,
) -> Result<Json<PaginatedUsersResponse>, AppError> {
    let (users, total) = UserService::get_users(&state.db, &params).await?;
    let meta = params.pagination.meta(users.len(), total);
    Ok(Json(PaginatedUsersResponse { data: users, meta }))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User with permissions", body = UserWithPermissions),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    RequireUsersRead(_auth): RequireUsersRead,
    Path(id): Path<Uuid>,
) -> Result<Json<UserWithPermissions>, AppError> {
    let user = UserService::get_user(&state.db, id).await?;
    Ok(Json(user))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn update_user(
    State(state): State<AppState>,
    RequireUsersUpdate(_auth): RequireUsersUpdate,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateUserDto>,
) -> Result<Json<User>, AppError> {
    let user = UserService::update_user(&state.db, id, dto).await?;
    Ok(Json(user))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}/permissions",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UpdatePermissionsDto,
    responses(
        (status = 200, description = "Permission list replaced", body = UserWithPermissions),
        (status = 400, description = "Unknown permission key", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn update_user_permissions(
    State(state): State<AppState>,
    RequireUsersEditPermissions(_auth): RequireUsersEditPermissions,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdatePermissionsDto>,
) -> Result<Json<UserWithPermissions>, AppError> {
    let user = UserService::update_permissions(&state.db, id, dto.permissions).await?;
    Ok(Json(user))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    RequireUsersDelete(_auth): RequireUsersDelete,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    UserService::delete_user(&state.db, id).await?;
    Ok(Json(json!({ "message": "User deleted successfully" })))
}

#[utoipa::path(
    get,
    path = "/api/users/permissions",
    responses(
        (status = 200, description = "The permission catalog grouped by category", body = Vec<PermissionCategoryGroup>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(_state))]
pub async fn get_permission_catalog(
    State(_state): State<AppState>,
    RequireUsersRead(_auth): RequireUsersRead,
) -> Json<Vec<PermissionCategoryGroup>> {
    Json(UserService::permission_catalog())
}

#[utoipa::path(
    get,
    path = "/api/users/permissions/defaults/{role}",
    params(("role" = String, Path, description = "Role name (e.g. secretary, teacher)")),
    responses(
        (status = 200, description = "Default permission seed for the role", body = Vec<String>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(_state))]
pub async fn get_role_defaults(
    State(_state): State<AppState>,
    RequireUsersRead(_auth): RequireUsersRead,
    Path(role): Path<String>,
) -> Json<Vec<String>> {
    Json(UserService::role_default_strings(Role::parse_lossy(&role)))
}
