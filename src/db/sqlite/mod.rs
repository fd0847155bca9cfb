//! SQLite implementation of the database traits.
//!
//! This module provides a SQLx-backed implementation of the repository
//! traits defined in the parent module.

mod connection;
mod records;

#[cfg(test)]
mod connection_test;

pub use connection::{PoolOptions, SqliteDatabase};
pub use records::SqliteRecordRepository;
