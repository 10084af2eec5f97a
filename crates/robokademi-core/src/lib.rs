//! # Robokademi Core
//!
//! Pure business logic for the robokademi back office:
//!
//! - [`permissions`]: the permission catalog, roles, and role-default seeds
//! - [`actor`]: the permission resolver (`Actor` and its check helpers)
//! - [`ledger`]: the attendance-driven session ledger
//! - [`pagination`]: pagination utilities for API responses
//!
//! Everything in this crate operates on caller-supplied, in-memory data.
//! No I/O, no async, no storage assumptions; the application crate owns
//! persistence and feeds these types from whatever store it uses.

pub mod actor;
pub mod ledger;
pub mod pagination;
pub mod permissions;

pub use actor::Actor;
pub use ledger::{
    apply_mark, AttendanceStatus, MarkKey, MarkOutcome, MarkSet, Roster, SubjectKind,
    UnenrolledPolicy,
};
pub use pagination::{PaginationMeta, PaginationParams};
pub use permissions::{Category, PermissionKey, Role, CATALOG};
