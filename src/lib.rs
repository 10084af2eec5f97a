//! # Robokademi API
//!
//! A REST back-office for a robotics-education business built with Axum and
//! SQLite. It manages students, teachers, courses, partner schools, "gafan"
//! partnership programs, registrations, a cash ledger, attendance marking and
//! a scheduling calendar, all behind a permission-gated JWT login.
//!
//! ## Architecture
//!
//! The codebase follows a modular layout:
//!
//! ```text
//! src/
//! ├── cli/              # CLI commands (create-superadmin)
//! ├── config/           # Env-driven configuration (database, JWT, CORS, attendance)
//! ├── middleware/       # Auth extractors and permission gates
//! ├── modules/          # Feature modules, one directory per surface
//! └── utils/            # Shared utilities (errors, JWT, passwords)
//! ```
//!
//! Each feature module has a `model`, `service`, `controller` and `router`
//! file. Services own the SQL; controllers own extraction, permission checks
//! and response shaping.
//!
//! Permission resolution and the attendance-driven session ledger live in the
//! [`robokademi_core`] crate so they stay testable without a database.

pub mod cli;
pub mod config;
pub mod docs;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;
