//! Core record storage for the user book.
//! Owns the SQLite store and the CRUD contract offered to UI callers.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{DbError, StoreLocation};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::user::{UserId, UserRecord};
pub use repo::user_repo::{SqliteUserStore, StoreError, StoreResult, UserRepository};
pub use service::user_service::UserService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
