use robokademi_core::Role;
use sqlx::SqlitePool;

use crate::modules::users::model::{CreateUserDto, UserWithPermissions};
use crate::modules::users::service::UserService;
use crate::utils::errors::AppError;

/// Bootstrap command: creates an account with the `super_admin` role, which
/// bypasses explicit permission checks entirely.
pub async fn create_superadmin(
    db: &SqlitePool,
    first_name: &str,
    last_name: &str,
    email: &str,
    password: &str,
) -> Result<UserWithPermissions, AppError> {
    let dto = CreateUserDto {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        role: Role::SuperAdmin,
    };
    UserService::create_user(db, dto).await
}
