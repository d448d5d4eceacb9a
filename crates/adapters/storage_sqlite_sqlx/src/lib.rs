//! # planthub-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the `HistoryLog` and `ActionLog` port traits defined in `planthub-app::ports`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `planthub-app` (for port traits) and `planthub-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod action_log;
mod error;
mod history_log;
mod pool;
mod timestamp;

pub use action_log::SqliteActionLog;
pub use error::StorageError;
pub use history_log::SqliteHistoryLog;
pub use pool::{Config, Database};
