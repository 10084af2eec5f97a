//! The permission resolver.
//!
//! An [`Actor`] is the authenticated user as the rest of the system sees
//! it: a role plus the explicit permission allow-list attached to the
//! user record. Checks are pure and total; an absent or malformed actor
//! is the caller's problem and must resolve to "no permissions" (fail
//! closed), never to an error.

use std::collections::HashSet;

use uuid::Uuid;

use crate::permissions::{PermissionKey, Role};

/// The authenticated user whose permissions are being checked.
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: Uuid,
    pub role: Role,
    pub permissions: HashSet<PermissionKey>,
}

impl Actor {
    pub fn new(id: Uuid, role: Role, permissions: impl IntoIterator<Item = PermissionKey>) -> Self {
        Self {
            id,
            role,
            permissions: permissions.into_iter().collect(),
        }
    }

    /// Build an actor with its role's default permission seed. Used at
    /// user creation; never consulted again afterward.
    pub fn with_role_defaults(id: Uuid, role: Role) -> Self {
        Self::new(id, role, role.default_permissions())
    }

    /// `true` iff the actor is a super admin or the key is in the
    /// explicit allow-list. Super admins bypass the list entirely,
    /// whatever its contents.
    pub fn has_permission(&self, key: PermissionKey) -> bool {
        self.role == Role::SuperAdmin || self.permissions.contains(&key)
    }

    /// Check if the actor holds any of the given permissions.
    pub fn has_any_permission(&self, keys: &[PermissionKey]) -> bool {
        keys.iter().any(|k| self.has_permission(*k))
    }

    /// Check if the actor holds all of the given permissions.
    pub fn has_all_permissions(&self, keys: &[PermissionKey]) -> bool {
        keys.iter().all(|k| self.has_permission(*k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::CATALOG;

    fn actor(role: Role, permissions: Vec<PermissionKey>) -> Actor {
        Actor::new(Uuid::new_v4(), role, permissions)
    }

    #[test]
    fn super_admin_has_every_permission_even_with_empty_list() {
        let admin = actor(Role::SuperAdmin, vec![]);
        for entry in CATALOG {
            assert!(admin.has_permission(entry.key), "{}", entry.key);
        }
    }

    #[test]
    fn non_super_admin_is_exactly_the_allow_list() {
        let secretary = actor(
            Role::Secretary,
            vec![PermissionKey::StudentsRead, PermissionKey::StudentsCreate],
        );
        for entry in CATALOG {
            assert_eq!(
                secretary.has_permission(entry.key),
                secretary.permissions.contains(&entry.key),
                "{}",
                entry.key
            );
        }
    }

    #[test]
    fn has_any_and_has_all() {
        let teacher = actor(
            Role::Teacher,
            vec![PermissionKey::AttendanceRead, PermissionKey::AttendanceEdit],
        );
        assert!(teacher.has_any_permission(&[
            PermissionKey::UsersDelete,
            PermissionKey::AttendanceRead,
        ]));
        assert!(!teacher.has_any_permission(&[
            PermissionKey::UsersDelete,
            PermissionKey::CashierRead,
        ]));
        assert!(teacher.has_all_permissions(&[
            PermissionKey::AttendanceRead,
            PermissionKey::AttendanceEdit,
        ]));
        assert!(!teacher.has_all_permissions(&[
            PermissionKey::AttendanceRead,
            PermissionKey::UsersDelete,
        ]));
    }

    #[test]
    fn seeded_actor_diverges_after_revocation() {
        let mut teacher = Actor::with_role_defaults(Uuid::new_v4(), Role::Teacher);
        assert!(teacher.has_permission(PermissionKey::AttendanceEdit));

        teacher.permissions.remove(&PermissionKey::AttendanceEdit);
        assert!(!teacher.has_permission(PermissionKey::AttendanceEdit));
        // The rest of the seed is untouched.
        assert!(teacher.has_permission(PermissionKey::AttendanceRead));
    }

    #[test]
    fn empty_permission_sets_deny_everything_below_super_admin() {
        for role in [Role::Secretary, Role::Accountant, Role::Teacher, Role::Student, Role::Other] {
            let bare = actor(role, vec![]);
            assert!(!bare.has_permission(PermissionKey::StudentsRead), "{role}");
        }
    }
}
