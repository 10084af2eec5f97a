//! Configuration modules for the robokademi API.
//!
//! Each submodule handles one aspect of configuration, loaded from
//! environment variables (with `.env` support via dotenvy at startup).
//!
//! - [`attendance`]: attendance/session-ledger policy
//! - [`cors`]: allowed CORS origins
//! - [`database`]: SQLite connection pool and embedded migrations
//! - [`jwt`]: JWT authentication configuration

pub mod attendance;
pub mod cors;
pub mod database;
pub mod jwt;
