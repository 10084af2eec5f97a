//! Feature modules. Each module follows the same structure:
//!
//! - `controller.rs`: HTTP handlers
//! - `service.rs`: business logic against the database
//! - `model.rs`: entities and DTOs
//! - `router.rs`: axum router wiring

pub mod attendance;
pub mod auth;
pub mod cashier;
pub mod courses;
pub mod gafan;
pub mod registrations;
pub mod schedule;
pub mod schools;
pub mod students;
pub mod teachers;
pub mod users;
