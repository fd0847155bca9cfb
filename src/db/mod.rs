//! Database abstraction layer.
//!
//! Trait-based abstractions for data access, so the HTTP layer never depends
//! on a concrete storage backend.
//!
//! # Architecture
//!
//! - `error`: Storage-agnostic error types
//! - `models`: The [`Record`] trait and the managed entities
//! - `repository`: Trait definitions for data access
//! - `sqlite`: SQLx-backed SQLite implementation

mod error;
mod models;
mod repository;
pub mod sqlite;

#[cfg(test)]
mod error_test;

pub use error::{DbError, DbResult};
pub use models::*;
pub use repository::*;
pub use sqlite::{PoolOptions, SqliteDatabase};
