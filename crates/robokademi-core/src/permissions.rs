//! The permission catalog for the robokademi back office.
//!
//! Every grantable capability in the system is one [`PermissionKey`],
//! grouped into a [`Category`] per back-office surface. The catalog is
//! static configuration: the resolver, the user-creation seeding logic,
//! and the admin UI's permission checkboxes all consume the single
//! [`CATALOG`] slice defined here.
//!
//! Keys use stable `"category:action"` wire strings so tokens and
//! stored permission lists stay readable, while the closed enum keeps
//! typos out of the codebase.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use utoipa::ToSchema;

/// One grantable capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionKey {
    // Courses
    CoursesCreate,
    CoursesRead,
    CoursesUpdate,
    CoursesDelete,
    // Students
    StudentsCreate,
    StudentsRead,
    StudentsUpdate,
    StudentsDelete,
    StudentsEnroll,
    // Teachers
    TeachersCreate,
    TeachersRead,
    TeachersUpdate,
    TeachersDelete,
    // Schools
    SchoolsCreate,
    SchoolsRead,
    SchoolsUpdate,
    SchoolsDelete,
    // Gafan partnership programs
    GafanCreate,
    GafanRead,
    GafanUpdate,
    GafanDelete,
    // Registrations
    RegistrationsCreate,
    RegistrationsRead,
    RegistrationsUpdate,
    RegistrationsDelete,
    // Cashier
    CashierRead,
    CashierRecord,
    CashierDelete,
    // Reports
    ReportsView,
    ReportsExport,
    // Attendance
    AttendanceRead,
    AttendanceEdit,
    // Schedule
    ScheduleCreate,
    ScheduleRead,
    ScheduleUpdate,
    ScheduleDelete,
    // Users
    UsersCreate,
    UsersRead,
    UsersUpdate,
    UsersDelete,
    UsersEditPermissions,
    // Settings
    SettingsRead,
    SettingsUpdate,
}

/// Catalog grouping, one per back-office surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Courses,
    Students,
    Teachers,
    Schools,
    Gafan,
    Registrations,
    Cashier,
    Reports,
    Attendance,
    Schedule,
    Users,
    Settings,
}

/// One catalog row: a key plus the metadata admin UIs render next to
/// its checkbox.
#[derive(Debug, Clone, Copy)]
pub struct PermissionEntry {
    pub key: PermissionKey,
    pub name: &'static str,
    pub description: &'static str,
}

impl PermissionKey {
    /// Stable wire string, used in tokens, storage, and the REST API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CoursesCreate => "courses:create",
            Self::CoursesRead => "courses:read",
            Self::CoursesUpdate => "courses:update",
            Self::CoursesDelete => "courses:delete",
            Self::StudentsCreate => "students:create",
            Self::StudentsRead => "students:read",
            Self::StudentsUpdate => "students:update",
            Self::StudentsDelete => "students:delete",
            Self::StudentsEnroll => "students:enroll",
            Self::TeachersCreate => "teachers:create",
            Self::TeachersRead => "teachers:read",
            Self::TeachersUpdate => "teachers:update",
            Self::TeachersDelete => "teachers:delete",
            Self::SchoolsCreate => "schools:create",
            Self::SchoolsRead => "schools:read",
            Self::SchoolsUpdate => "schools:update",
            Self::SchoolsDelete => "schools:delete",
            Self::GafanCreate => "gafan:create",
            Self::GafanRead => "gafan:read",
            Self::GafanUpdate => "gafan:update",
            Self::GafanDelete => "gafan:delete",
            Self::RegistrationsCreate => "registrations:create",
            Self::RegistrationsRead => "registrations:read",
            Self::RegistrationsUpdate => "registrations:update",
            Self::RegistrationsDelete => "registrations:delete",
            Self::CashierRead => "cashier:read",
            Self::CashierRecord => "cashier:record",
            Self::CashierDelete => "cashier:delete",
            Self::ReportsView => "reports:view",
            Self::ReportsExport => "reports:export",
            Self::AttendanceRead => "attendance:read",
            Self::AttendanceEdit => "attendance:edit",
            Self::ScheduleCreate => "schedule:create",
            Self::ScheduleRead => "schedule:read",
            Self::ScheduleUpdate => "schedule:update",
            Self::ScheduleDelete => "schedule:delete",
            Self::UsersCreate => "users:create",
            Self::UsersRead => "users:read",
            Self::UsersUpdate => "users:update",
            Self::UsersDelete => "users:delete",
            Self::UsersEditPermissions => "users:edit_permissions",
            Self::SettingsRead => "settings:read",
            Self::SettingsUpdate => "settings:update",
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Self::CoursesCreate | Self::CoursesRead | Self::CoursesUpdate | Self::CoursesDelete => {
                Category::Courses
            }
            Self::StudentsCreate
            | Self::StudentsRead
            | Self::StudentsUpdate
            | Self::StudentsDelete
            | Self::StudentsEnroll => Category::Students,
            Self::TeachersCreate
            | Self::TeachersRead
            | Self::TeachersUpdate
            | Self::TeachersDelete => Category::Teachers,
            Self::SchoolsCreate | Self::SchoolsRead | Self::SchoolsUpdate | Self::SchoolsDelete => {
                Category::Schools
            }
            Self::GafanCreate | Self::GafanRead | Self::GafanUpdate | Self::GafanDelete => {
                Category::Gafan
            }
            Self::RegistrationsCreate
            | Self::RegistrationsRead
            | Self::RegistrationsUpdate
            | Self::RegistrationsDelete => Category::Registrations,
            Self::CashierRead | Self::CashierRecord | Self::CashierDelete => Category::Cashier,
            Self::ReportsView | Self::ReportsExport => Category::Reports,
            Self::AttendanceRead | Self::AttendanceEdit => Category::Attendance,
            Self::ScheduleCreate
            | Self::ScheduleRead
            | Self::ScheduleUpdate
            | Self::ScheduleDelete => Category::Schedule,
            Self::UsersCreate
            | Self::UsersRead
            | Self::UsersUpdate
            | Self::UsersDelete
            | Self::UsersEditPermissions => Category::Users,
            Self::SettingsRead | Self::SettingsUpdate => Category::Settings,
        }
    }

    /// Catalog metadata for this key.
    pub fn entry(&self) -> &'static PermissionEntry {
        // CATALOG carries exactly one entry per variant.
        CATALOG
            .iter()
            .find(|e| e.key == *self)
            .unwrap_or(&CATALOG[0])
    }
}

impl fmt::Display for PermissionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a wire string matches no catalog key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPermission(pub String);

impl fmt::Display for UnknownPermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown permission key: {}", self.0)
    }
}

impl std::error::Error for UnknownPermission {}

impl FromStr for PermissionKey {
    type Err = UnknownPermission;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CATALOG
            .iter()
            .map(|e| e.key)
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownPermission(s.to_string()))
    }
}

impl Serialize for PermissionKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PermissionKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Courses => "courses",
            Self::Students => "students",
            Self::Teachers => "teachers",
            Self::Schools => "schools",
            Self::Gafan => "gafan",
            Self::Registrations => "registrations",
            Self::Cashier => "cashier",
            Self::Reports => "reports",
            Self::Attendance => "attendance",
            Self::Schedule => "schedule",
            Self::Users => "users",
            Self::Settings => "settings",
        }
    }
}

/// The full static catalog, ordered by category.
pub static CATALOG: &[PermissionEntry] = &[
    PermissionEntry {
        key: PermissionKey::CoursesCreate,
        name: "Create courses",
        description: "Add new courses to the catalog",
    },
    PermissionEntry {
        key: PermissionKey::CoursesRead,
        name: "View courses",
        description: "Browse the course catalog",
    },
    PermissionEntry {
        key: PermissionKey::CoursesUpdate,
        name: "Edit courses",
        description: "Change course details and assignments",
    },
    PermissionEntry {
        key: PermissionKey::CoursesDelete,
        name: "Delete courses",
        description: "Remove courses from the catalog",
    },
    PermissionEntry {
        key: PermissionKey::StudentsCreate,
        name: "Create students",
        description: "Register new students",
    },
    PermissionEntry {
        key: PermissionKey::StudentsRead,
        name: "View students",
        description: "Browse and search the student roster",
    },
    PermissionEntry {
        key: PermissionKey::StudentsUpdate,
        name: "Edit students",
        description: "Change student details",
    },
    PermissionEntry {
        key: PermissionKey::StudentsDelete,
        name: "Delete students",
        description: "Remove students from the roster",
    },
    PermissionEntry {
        key: PermissionKey::StudentsEnroll,
        name: "Enroll students",
        description: "Enroll students in courses and manage session balances",
    },
    PermissionEntry {
        key: PermissionKey::TeachersCreate,
        name: "Create teachers",
        description: "Add new teachers",
    },
    PermissionEntry {
        key: PermissionKey::TeachersRead,
        name: "View teachers",
        description: "Browse the teacher list",
    },
    PermissionEntry {
        key: PermissionKey::TeachersUpdate,
        name: "Edit teachers",
        description: "Change teacher details",
    },
    PermissionEntry {
        key: PermissionKey::TeachersDelete,
        name: "Delete teachers",
        description: "Remove teachers",
    },
    PermissionEntry {
        key: PermissionKey::SchoolsCreate,
        name: "Create schools",
        description: "Add partner schools",
    },
    PermissionEntry {
        key: PermissionKey::SchoolsRead,
        name: "View schools",
        description: "Browse partner schools",
    },
    PermissionEntry {
        key: PermissionKey::SchoolsUpdate,
        name: "Edit schools",
        description: "Change school details",
    },
    PermissionEntry {
        key: PermissionKey::SchoolsDelete,
        name: "Delete schools",
        description: "Remove partner schools",
    },
    PermissionEntry {
        key: PermissionKey::GafanCreate,
        name: "Create gafan programs",
        description: "Add gafan partnership programs",
    },
    PermissionEntry {
        key: PermissionKey::GafanRead,
        name: "View gafan programs",
        description: "Browse gafan partnership programs",
    },
    PermissionEntry {
        key: PermissionKey::GafanUpdate,
        name: "Edit gafan programs",
        description: "Change gafan program details",
    },
    PermissionEntry {
        key: PermissionKey::GafanDelete,
        name: "Delete gafan programs",
        description: "Remove gafan partnership programs",
    },
    PermissionEntry {
        key: PermissionKey::RegistrationsCreate,
        name: "Create registrations",
        description: "Record new course registrations",
    },
    PermissionEntry {
        key: PermissionKey::RegistrationsRead,
        name: "View registrations",
        description: "Browse course registrations",
    },
    PermissionEntry {
        key: PermissionKey::RegistrationsUpdate,
        name: "Edit registrations",
        description: "Change registration status",
    },
    PermissionEntry {
        key: PermissionKey::RegistrationsDelete,
        name: "Delete registrations",
        description: "Remove registrations",
    },
    PermissionEntry {
        key: PermissionKey::CashierRead,
        name: "View cash ledger",
        description: "Browse cash transactions and summaries",
    },
    PermissionEntry {
        key: PermissionKey::CashierRecord,
        name: "Record transactions",
        description: "Record income and expense entries",
    },
    PermissionEntry {
        key: PermissionKey::CashierDelete,
        name: "Delete transactions",
        description: "Remove cash ledger entries",
    },
    PermissionEntry {
        key: PermissionKey::ReportsView,
        name: "View reports",
        description: "View business reports",
    },
    PermissionEntry {
        key: PermissionKey::ReportsExport,
        name: "Export reports",
        description: "Export report data",
    },
    PermissionEntry {
        key: PermissionKey::AttendanceRead,
        name: "View attendance",
        description: "View attendance sheets and session balances",
    },
    PermissionEntry {
        key: PermissionKey::AttendanceEdit,
        name: "Mark attendance",
        description: "Mark attendance and debit session balances",
    },
    PermissionEntry {
        key: PermissionKey::ScheduleCreate,
        name: "Create schedule events",
        description: "Add events to the calendar",
    },
    PermissionEntry {
        key: PermissionKey::ScheduleRead,
        name: "View schedule",
        description: "View the scheduling calendar",
    },
    PermissionEntry {
        key: PermissionKey::ScheduleUpdate,
        name: "Edit schedule events",
        description: "Change calendar events",
    },
    PermissionEntry {
        key: PermissionKey::ScheduleDelete,
        name: "Delete schedule events",
        description: "Remove calendar events",
    },
    PermissionEntry {
        key: PermissionKey::UsersCreate,
        name: "Create users",
        description: "Create back-office user accounts",
    },
    PermissionEntry {
        key: PermissionKey::UsersRead,
        name: "View users",
        description: "Browse back-office user accounts",
    },
    PermissionEntry {
        key: PermissionKey::UsersUpdate,
        name: "Edit users",
        description: "Change user account details",
    },
    PermissionEntry {
        key: PermissionKey::UsersDelete,
        name: "Delete users",
        description: "Remove user accounts",
    },
    PermissionEntry {
        key: PermissionKey::UsersEditPermissions,
        name: "Edit permissions",
        description: "Grant or revoke a user's permissions",
    },
    PermissionEntry {
        key: PermissionKey::SettingsRead,
        name: "View settings",
        description: "View business settings",
    },
    PermissionEntry {
        key: PermissionKey::SettingsUpdate,
        name: "Edit settings",
        description: "Change business settings",
    },
];

/// Back-office roles. A role determines the permission set a user is
/// seeded with at creation; after that the explicit list on the user is
/// authoritative (except for [`Role::SuperAdmin`], which bypasses the
/// list entirely).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    Secretary,
    Accountant,
    Teacher,
    Student,
    Other,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::Secretary => "secretary",
            Self::Accountant => "accountant",
            Self::Teacher => "teacher",
            Self::Student => "student",
            Self::Other => "other",
        }
    }

    /// Parse a stored role string. Unknown values fail closed to
    /// [`Role::Other`] rather than erroring.
    pub fn parse_lossy(s: &str) -> Self {
        match s {
            "super_admin" => Self::SuperAdmin,
            "secretary" => Self::Secretary,
            "accountant" => Self::Accountant,
            "teacher" => Self::Teacher,
            "student" => Self::Student,
            _ => Self::Other,
        }
    }

    /// The permission set a newly created user of this role starts with.
    ///
    /// This is a one-time seed, consulted only at user creation. Editing
    /// a user's permissions afterward never re-reads this table, so two
    /// users with the same role may legitimately diverge.
    pub fn default_permissions(&self) -> Vec<PermissionKey> {
        use PermissionKey::*;
        match self {
            // Full catalog: used for UI pre-selection only. The resolver
            // short-circuits on the role itself.
            Self::SuperAdmin => CATALOG.iter().map(|e| e.key).collect(),
            Self::Secretary => vec![
                CoursesCreate,
                CoursesRead,
                CoursesUpdate,
                CoursesDelete,
                StudentsCreate,
                StudentsRead,
                StudentsUpdate,
                StudentsDelete,
                StudentsEnroll,
                TeachersCreate,
                TeachersRead,
                TeachersUpdate,
                SchoolsCreate,
                SchoolsRead,
                SchoolsUpdate,
                GafanCreate,
                GafanRead,
                GafanUpdate,
                RegistrationsCreate,
                RegistrationsRead,
                RegistrationsUpdate,
                RegistrationsDelete,
                CashierRead,
                AttendanceRead,
                AttendanceEdit,
                ScheduleCreate,
                ScheduleRead,
                ScheduleUpdate,
                ScheduleDelete,
                ReportsView,
            ],
            Self::Accountant => vec![
                CashierRead,
                CashierRecord,
                CashierDelete,
                ReportsView,
                ReportsExport,
                StudentsRead,
                RegistrationsRead,
            ],
            Self::Teacher => vec![
                CoursesRead,
                StudentsRead,
                AttendanceRead,
                AttendanceEdit,
                ScheduleRead,
            ],
            Self::Student => vec![ScheduleRead],
            Self::Other => vec![],
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
