use sqlx::SqlitePool;
use tracing::instrument;
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::users::model::UserWithPermissions;
use crate::modules::users::service::UserService;
use crate::utils::errors::AppError;
use crate::utils::jwt::create_access_token;
use crate::utils::password::verify_password;

use super::model::{LoginRequest, LoginResponse};

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, dto, jwt_config))]
    pub async fn login_user(
        db: &SqlitePool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        #[derive(sqlx::FromRow)]
        struct UserWithPassword {
            id: Uuid,
            password: String,
        }

        let row = sqlx::query_as::<_, UserWithPassword>(
            "SELECT id, password FROM users WHERE email = ?",
        )
        .bind(&dto.email)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

        if !verify_password(&dto.password, &row.password)? {
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        let user = UserService::get_user(db, row.id).await?;
        let access_token = create_access_token(
            user.user.id,
            &user.user.email,
            &user.user.role,
            user.permissions,
            jwt_config,
        )?;

        Ok(LoginResponse {
            access_token,
            user: user.user,
        })
    }

    #[instrument(skip(db))]
    pub async fn get_profile(db: &SqlitePool, user_id: Uuid) -> Result<UserWithPermissions, AppError> {
        UserService::get_user(db, user_id).await
    }
}
