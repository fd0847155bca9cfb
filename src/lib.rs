//! Tally: CRUD over single-table SQL records, served as JSON over HTTP.
//!
//! - [`db`] holds the storage-agnostic [`db::Record`] and repository traits
//!   plus the SQLite implementation.
//! - [`api`] holds the generic handlers, router, and server lifecycle.

pub mod api;
pub mod db;
