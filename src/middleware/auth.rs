use std::str::FromStr;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use robokademi_core::{Actor, PermissionKey, Role};
use uuid::Uuid;

use crate::modules::auth::model::Claims;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::verify_token;

/// Extractor that validates the JWT and exposes the authenticated user.
/// Claims carry the role and permission strings, so checks resolve
/// entirely in memory.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Resolve the claims into a core [`Actor`]. Unknown role strings
    /// fall back to `Other` and unknown permission strings are dropped,
    /// so malformed tokens fail closed rather than erroring.
    pub fn actor(&self) -> Actor {
        let id = Uuid::parse_str(&self.0.sub).unwrap_or(Uuid::nil());
        let role = Role::parse_lossy(&self.0.role);
        let permissions = self
            .0
            .permissions
            .iter()
            .filter_map(|p| PermissionKey::from_str(p).ok());
        Actor::new(id, role, permissions)
    }

    pub fn has_permission(&self, key: PermissionKey) -> bool {
        self.actor().has_permission(key)
    }

    pub fn has_any_permission(&self, keys: &[PermissionKey]) -> bool {
        self.actor().has_any_permission(keys)
    }

    pub fn has_all_permissions(&self, keys: &[PermissionKey]) -> bool {
        self.actor().has_all_permissions(keys)
    }

    pub fn is_super_admin(&self) -> bool {
        Role::parse_lossy(&self.0.role) == Role::SuperAdmin
    }

    /// Get the user ID as UUID
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.0.sub)
            .map_err(|_| AppError::unauthorized("Invalid user ID in token"))
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid authorization header format"))?;

        let claims = verify_token(token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}

/// Creates a permission-gated extractor: the wrapped handler argument
/// only resolves when the authenticated user holds the given catalog
/// permission (or is a super admin).
#[macro_export]
macro_rules! require_permission {
    ($name:ident, $permission:ident) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::AuthUser);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = $crate::utils::errors::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth_user =
                    $crate::middleware::auth::AuthUser::from_request_parts(parts, state).await?;

                let key = robokademi_core::PermissionKey::$permission;
                if !auth_user.has_permission(key) {
                    return Err($crate::utils::errors::AppError::forbidden(format!(
                        "Access denied. Missing required permission: {}",
                        key
                    )));
                }

                Ok($name(auth_user))
            }
        }
    };
}

// Pre-defined permission extractors, one per gated route group.

// Courses
require_permission!(RequireCoursesCreate, CoursesCreate);
require_permission!(RequireCoursesRead, CoursesRead);
require_permission!(RequireCoursesUpdate, CoursesUpdate);
require_permission!(RequireCoursesDelete, CoursesDelete);

// Students
require_permission!(RequireStudentsCreate, StudentsCreate);
require_permission!(RequireStudentsRead, StudentsRead);
require_permission!(RequireStudentsUpdate, StudentsUpdate);
require_permission!(RequireStudentsDelete, StudentsDelete);
require_permission!(RequireStudentsEnroll, StudentsEnroll);

// Teachers
require_permission!(RequireTeachersCreate, TeachersCreate);
require_permission!(RequireTeachersRead, TeachersRead);
require_permission!(RequireTeachersUpdate, TeachersUpdate);
require_permission!(RequireTeachersDelete, TeachersDelete);

// Schools
require_permission!(RequireSchoolsCreate, SchoolsCreate);
require_permission!(RequireSchoolsRead, SchoolsRead);
require_permission!(RequireSchoolsUpdate, SchoolsUpdate);
require_permission!(RequireSchoolsDelete, SchoolsDelete);

// Gafan programs
require_permission!(RequireGafanCreate, GafanCreate);
require_permission!(RequireGafanRead, GafanRead);
require_permission!(RequireGafanUpdate, GafanUpdate);
require_permission!(RequireGafanDelete, GafanDelete);

// Registrations
require_permission!(RequireRegistrationsCreate, RegistrationsCreate);
require_permission!(RequireRegistrationsRead, RegistrationsRead);
require_permission!(RequireRegistrationsUpdate, RegistrationsUpdate);
require_permission!(RequireRegistrationsDelete, RegistrationsDelete);

// Cashier
require_permission!(RequireCashierRead, CashierRead);
require_permission!(RequireCashierRecord, CashierRecord);
require_permission!(RequireCashierDelete, CashierDelete);

// Attendance
require_permission!(RequireAttendanceRead, AttendanceRead);
require_permission!(RequireAttendanceEdit, AttendanceEdit);

// Schedule
require_permission!(RequireScheduleCreate, ScheduleCreate);
require_permission!(RequireScheduleRead, ScheduleRead);
require_permission!(RequireScheduleUpdate, ScheduleUpdate);
require_permission!(RequireScheduleDelete, ScheduleDelete);

// Users
require_permission!(RequireUsersCreate, UsersCreate);
require_permission!(RequireUsersRead, UsersRead);
require_permission!(RequireUsersUpdate, UsersUpdate);
require_permission!(RequireUsersDelete, UsersDelete);
require_permission!(RequireUsersEditPermissions, UsersEditPermissions);

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_claims(role: &str, permissions: Vec<String>) -> Claims {
        Claims {
            sub: Uuid::new_v4().to_string(),
            email: "test@example.com".to_string(),
            role: role.to_string(),
            permissions,
            exp: 9999999999,
            iat: 1234567890,
        }
    }

    #[test]
    fn test_has_permission() {
        let claims = create_test_claims(
            "secretary",
            vec!["students:read".to_string(), "students:create".to_string()],
        );
        let auth_user = AuthUser(claims);

        assert!(auth_user.has_permission(PermissionKey::StudentsRead));
        assert!(auth_user.has_permission(PermissionKey::StudentsCreate));
        assert!(!auth_user.has_permission(PermissionKey::StudentsDelete));
    }

    #[test]
    fn test_super_admin_bypasses_permission_list() {
        let claims = create_test_claims("super_admin", vec![]);
        let auth_user = AuthUser(claims);

        assert!(auth_user.is_super_admin());
        assert!(auth_user.has_permission(PermissionKey::UsersDelete));
        assert!(auth_user.has_permission(PermissionKey::SettingsUpdate));
    }

    #[test]
    fn test_has_any_permission() {
        let claims = create_test_claims("teacher", vec!["attendance:read".to_string()]);
        let auth_user = AuthUser(claims);

        assert!(auth_user.has_any_permission(&[
            PermissionKey::AttendanceRead,
            PermissionKey::UsersDelete,
        ]));
        assert!(!auth_user.has_any_permission(&[
            PermissionKey::UsersCreate,
            PermissionKey::UsersDelete,
        ]));
    }

    #[test]
    fn test_has_all_permissions() {
        let claims = create_test_claims(
            "teacher",
            vec!["attendance:read".to_string(), "attendance:edit".to_string()],
        );
        let auth_user = AuthUser(claims);

        assert!(auth_user.has_all_permissions(&[
            PermissionKey::AttendanceRead,
            PermissionKey::AttendanceEdit,
        ]));
        assert!(!auth_user.has_all_permissions(&[
            PermissionKey::AttendanceRead,
            PermissionKey::UsersDelete,
        ]));
    }

    #[test]
    fn test_unknown_role_and_permission_strings_fail_closed() {
        let claims = create_test_claims(
            "janitor",
            vec!["students:fly".to_string(), "students:read".to_string()],
        );
        let auth_user = AuthUser(claims);

        assert!(!auth_user.is_super_admin());
        assert!(auth_user.has_permission(PermissionKey::StudentsRead));
        assert!(!auth_user.has_permission(PermissionKey::StudentsUpdate));
    }

    #[test]
    fn test_user_id() {
        let user_id = Uuid::new_v4();
        let claims = Claims {
            sub: user_id.to_string(),
            email: "test@example.com".to_string(),
            role: "secretary".to_string(),
            permissions: vec![],
            exp: 9999999999,
            iat: 1234567890,
        };
        let auth_user = AuthUser(claims);

        assert_eq!(auth_user.user_id().unwrap(), user_id);
    }
}
