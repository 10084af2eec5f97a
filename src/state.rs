use sqlx::SqlitePool;

use crate::config::attendance::AttendanceConfig;
use crate::config::cors::CorsConfig;
use crate::config::database::init_db_pool;
use crate::config::jwt::JwtConfig;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: SqlitePool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub attendance_config: AttendanceConfig,
}

impl AppState {
    /// Build state around an existing pool. Used by tests, which bring
    /// their own migrated database.
    pub fn with_pool(db: SqlitePool) -> Self {
        Self {
            db,
            jwt_config: JwtConfig::from_env(),
            cors_config: CorsConfig::from_env(),
            attendance_config: AttendanceConfig::from_env(),
        }
    }
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    Ok(AppState::with_pool(init_db_pool().await?))
}
