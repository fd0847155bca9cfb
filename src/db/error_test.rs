//! Tests for database error types.

use crate::db::{DbError, DbResult};

#[test]
fn not_found_error_displays_correctly() {
    let err = DbError::not_found("Transaction", 42);
    assert_eq!(
        err.to_string(),
        "Entity not found: Transaction with id '42'"
    );
}

#[test]
fn validation_error_displays_correctly() {
    let err = DbError::Validation {
        message: "description must not be empty".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Validation error: description must not be empty"
    );
}

#[test]
fn database_error_displays_correctly() {
    let err = DbError::Database {
        message: "no such table: transactions".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Database error: no such table: transactions"
    );
}

#[test]
fn migration_error_displays_correctly() {
    let err = DbError::Migration {
        message: "failed to apply migration 0001".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Migration error: failed to apply migration 0001"
    );
}

#[test]
fn connection_error_displays_correctly() {
    let err = DbError::Connection {
        message: "unable to open database".to_string(),
    };
    assert_eq!(err.to_string(), "Connection error: unable to open database");
}

#[test]
fn pool_timeout_maps_to_connection_error() {
    let err = DbError::from(sqlx::Error::PoolTimedOut);
    assert!(matches!(err, DbError::Connection { .. }));
}

#[test]
fn row_not_found_maps_to_database_error() {
    // RowNotFound never escapes a repository as NotFound; `get` uses
    // fetch_optional and builds NotFound itself.
    let err = DbError::from(sqlx::Error::RowNotFound);
    assert!(matches!(err, DbError::Database { .. }));
}

#[test]
fn db_result_err_returns_error() {
    let result: DbResult<i64> = Err(DbError::not_found("Student", 7));
    assert!(result.is_err());
}
