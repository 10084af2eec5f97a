use std::str::FromStr;

use anyhow::{Context, anyhow};
use chrono::Utc;
use robokademi_core::{CATALOG, Category, PermissionKey, Role};
use sqlx::SqlitePool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::{errors::AppError, password::hash_password};

use super::model::{
    CreateUserDto, PermissionCategoryGroup, PermissionInfo, UpdateUserDto, User,
    UserFilterParams, UserWithPermissions,
};

pub struct UserService;

impl UserService {
    /// Create a user and seed their permission list from the role's
    /// default table. The seed happens exactly once, here; later edits
    /// to the user (including role changes) never re-derive it.
    #[instrument(skip(db, dto))]
    pub async fn create_user(db: &SqlitePool, dto: CreateUserDto) -> Result<UserWithPermissions, AppError> {
        let hashed_password = hash_password(&dto.password)?;
        let id = Uuid::new_v4();
        let now = Utc::now();

        let mut tx = db.begin().await.map_err(AppError::database)?;

        sqlx::query(
            "INSERT INTO users (id, first_name, last_name, email, password, role, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(&dto.email)
        .bind(&hashed_password)
        .bind(dto.role.as_str())
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::bad_request(anyhow!(
                        "User with email {} already exists",
                        dto.email
                    ));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })?;

        let seed = dto.role.default_permissions();
        for key in &seed {
            sqlx::query("INSERT INTO user_permissions (user_id, permission) VALUES (?, ?)")
                .bind(id)
                .bind(key.as_str())
                .execute(&mut *tx)
                .await
                .map_err(AppError::database)?;
        }

        tx.commit().await.map_err(AppError::database)?;

        let user = Self::get_user(db, id).await?;
        Ok(user)
    }

    #[instrument(skip(db))]
    pub async fn get_users(
        db: &SqlitePool,
        params: &UserFilterParams,
    ) -> Result<(Vec<User>, i64), AppError> {
        let mut sql = String::from(
            "SELECT id, first_name, last_name, email, role, created_at, updated_at
             FROM users WHERE 1=1",
        );
        let mut count_sql = String::from("SELECT COUNT(*) FROM users WHERE 1=1");

        if params.search.is_some() {
            let clause = " AND (first_name LIKE ? OR last_name LIKE ? OR email LIKE ?)";
            sql.push_str(clause);
            count_sql.push_str(clause);
        }
        if params.role.is_some() {
            sql.push_str(" AND role = ?");
            count_sql.push_str(" AND role = ?");
        }
        sql.push_str(" ORDER BY last_name, first_name LIMIT ? OFFSET ?");

        let pattern = params.search.as_ref().map(|s| format!("%{}%", s));

        let mut query = sqlx::query_as::<_, User>(&sql);
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        if let Some(ref pattern) = pattern {
            query = query.bind(pattern).bind(pattern).bind(pattern);
            count_query = count_query.bind(pattern).bind(pattern).bind(pattern);
        }
        if let Some(ref role) = params.role {
            query = query.bind(role);
            count_query = count_query.bind(role);
        }
        query = query
            .bind(params.pagination.limit())
            .bind(params.pagination.offset());

        let users = query
            .fetch_all(db)
            .await
            .context("Failed to fetch users")
            .map_err(AppError::database)?;
        let total = count_query
            .fetch_one(db)
            .await
            .context("Failed to count users")
            .map_err(AppError::database)?;

        Ok((users, total))
    }

    #[instrument(skip(db))]
    pub async fn get_user(db: &SqlitePool, id: Uuid) -> Result<UserWithPermissions, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, first_name, last_name, email, role, created_at, updated_at
             FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch user")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow!("User not found")))?;

        let permissions = Self::get_permission_strings(db, id).await?;

        Ok(UserWithPermissions { user, permissions })
    }

    /// The stored permission allow-list, in catalog order.
    #[instrument(skip(db))]
    pub async fn get_permission_strings(
        db: &SqlitePool,
        user_id: Uuid,
    ) -> Result<Vec<String>, AppError> {
        let stored: Vec<String> =
            sqlx::query_scalar("SELECT permission FROM user_permissions WHERE user_id = ?")
                .bind(user_id)
                .fetch_all(db)
                .await
                .context("Failed to fetch user permissions")
                .map_err(AppError::database)?;

        // Catalog order, dropping any string no longer in the catalog.
        let mut keys: Vec<PermissionKey> = stored
            .iter()
            .filter_map(|s| PermissionKey::from_str(s).ok())
            .collect();
        keys.sort_by_key(|k| CATALOG.iter().position(|e| e.key == *k));
        Ok(keys.iter().map(|k| k.as_str().to_string()).collect())
    }

    #[instrument(skip(db, dto))]
    pub async fn update_user(
        db: &SqlitePool,
        id: Uuid,
        dto: UpdateUserDto,
    ) -> Result<User, AppError> {
        let existing = Self::get_user(db, id).await?.user;

        let first_name = dto.first_name.unwrap_or(existing.first_name);
        let last_name = dto.last_name.unwrap_or(existing.last_name);
        let email = dto.email.unwrap_or(existing.email);
        let role = dto
            .role
            .map(|r| r.as_str().to_string())
            .unwrap_or(existing.role);
        let password = dto.password.map(|p| hash_password(&p)).transpose()?;
        let now = Utc::now();

        let result = if let Some(password) = password {
            sqlx::query(
                "UPDATE users SET first_name = ?, last_name = ?, email = ?, role = ?, password = ?, updated_at = ?
                 WHERE id = ?",
            )
            .bind(&first_name)
            .bind(&last_name)
            .bind(&email)
            .bind(&role)
            .bind(&password)
            .bind(now)
            .bind(id)
            .execute(db)
            .await
        } else {
            sqlx::query(
                "UPDATE users SET first_name = ?, last_name = ?, email = ?, role = ?, updated_at = ?
                 WHERE id = ?",
            )
            .bind(&first_name)
            .bind(&last_name)
            .bind(&email)
            .bind(&role)
            .bind(now)
            .bind(id)
            .execute(db)
            .await
        };

        result.map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::bad_request(anyhow!(
                        "User with email {} already exists",
                        email
                    ));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })?;

        Ok(Self::get_user(db, id).await?.user)
    }

    /// Replace the explicit allow-list wholesale. Unknown permission
    /// strings are rejected rather than silently dropped, since this is
    /// an administrative edit.
    #[instrument(skip(db))]
    pub async fn update_permissions(
        db: &SqlitePool,
        id: Uuid,
        permissions: Vec<String>,
    ) -> Result<UserWithPermissions, AppError> {
        let mut keys = Vec::with_capacity(permissions.len());
        for s in &permissions {
            let key = PermissionKey::from_str(s)
                .map_err(|e| AppError::bad_request(anyhow!("{}", e)))?;
            if !keys.contains(&key) {
                keys.push(key);
            }
        }

        // Ensure the user exists before touching the list.
        Self::get_user(db, id).await?;

        let mut tx = db.begin().await.map_err(AppError::database)?;

        sqlx::query("DELETE FROM user_permissions WHERE user_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::database)?;

        for key in &keys {
            sqlx::query("INSERT INTO user_permissions (user_id, permission) VALUES (?, ?)")
                .bind(id)
                .bind(key.as_str())
                .execute(&mut *tx)
                .await
                .map_err(AppError::database)?;
        }

        tx.commit().await.map_err(AppError::database)?;

        Self::get_user(db, id).await
    }

    #[instrument(skip(db))]
    pub async fn delete_user(db: &SqlitePool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete user")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("User not found")));
        }

        Ok(())
    }

    /// The static catalog, grouped by category for permission-selection
    /// UIs. Pure configuration; no database involved.
    pub fn permission_catalog() -> Vec<PermissionCategoryGroup> {
        let categories = [
            Category::Courses,
            Category::Students,
            Category::Teachers,
            Category::Schools,
            Category::Gafan,
            Category::Registrations,
            Category::Cashier,
            Category::Reports,
            Category::Attendance,
            Category::Schedule,
            Category::Users,
            Category::Settings,
        ];

        categories
            .iter()
            .map(|category| PermissionCategoryGroup {
                category: category.as_str().to_string(),
                permissions: CATALOG
                    .iter()
                    .filter(|e| e.key.category() == *category)
                    .map(|e| PermissionInfo {
                        key: e.key.as_str().to_string(),
                        name: e.name.to_string(),
                        description: e.description.to_string(),
                    })
                    .collect(),
            })
            .collect()
    }

    /// Role-default seeds for the creation form's pre-selection.
    pub fn role_default_strings(role: Role) -> Vec<String> {
        role.default_permissions()
            .iter()
            .map(|k| k.as_str().to_string())
            .collect()
    }
}
