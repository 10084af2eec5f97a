use chrono::{DateTime, Utc};
use robokademi_core::{PaginationMeta, Role};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A back-office user account. The password hash never leaves the
/// service layer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user together with their explicit permission allow-list.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserWithPermissions {
    #[serde(flatten)]
    pub user: User,
    pub permissions: Vec<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserDto {
    #[validate(length(min = 1, message = "first_name must not be empty"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "last_name must not be empty"))]
    pub last_name: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserDto {
    #[validate(length(min = 1, message = "first_name must not be empty"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, message = "last_name must not be empty"))]
    pub last_name: Option<String>,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: Option<String>,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: Option<String>,
    /// Changing the role never re-seeds permissions; the explicit list
    /// stays as it is.
    pub role: Option<Role>,
}

/// Wholesale replacement of a user's permission allow-list.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePermissionsDto {
    pub permissions: Vec<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UserFilterParams {
    /// Matches against first name, last name, or email
    pub search: Option<String>,
    /// Restrict to one role
    pub role: Option<String>,
    #[serde(flatten)]
    pub pagination: robokademi_core::PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedUsersResponse {
    pub data: Vec<User>,
    pub meta: PaginationMeta,
}

/// One catalog entry as rendered by permission-selection UIs.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PermissionInfo {
    pub key: String,
    pub name: String,
    pub description: String,
}

/// The permission catalog grouped by category.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PermissionCategoryGroup {
    pub category: String,
    pub permissions: Vec<PermissionInfo>,
}
