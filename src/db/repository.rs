//! Repository traits for data access abstraction.
//!
//! These traits define the contract for data access, allowing different
//! storage backends to be swapped without changing the handlers.

use std::future::Future;

use crate::db::{
    DbResult,
    models::{FieldValue, Record, RecordId},
};

/// Single-table CRUD over records of type `R`.
///
/// `update` and `delete` report rows affected; zero means no row has the id.
pub trait RecordRepository<R: Record> {
    /// Get all records, ordered by id.
    fn list(&self) -> impl Future<Output = DbResult<Vec<R>>> + Send;

    /// Get a record by ID.
    fn get(&self, id: RecordId) -> impl Future<Output = DbResult<R>> + Send;

    /// Insert a new record and return its store-assigned ID.
    fn insert(&self, fields: &R::Fields) -> impl Future<Output = DbResult<RecordId>> + Send;

    /// Overwrite every mutable field of a record.
    fn update(
        &self,
        id: RecordId,
        fields: &R::Fields,
    ) -> impl Future<Output = DbResult<u64>> + Send;

    /// Overwrite one mutable column in a single statement, leaving the others
    /// as they are. `column` must be one of `R::COLUMNS`.
    fn set_field(
        &self,
        id: RecordId,
        column: &'static str,
        value: FieldValue,
    ) -> impl Future<Output = DbResult<u64>> + Send;

    /// Delete a record by ID.
    fn delete(&self, id: RecordId) -> impl Future<Output = DbResult<u64>> + Send;
}

/// Combined database interface.
pub trait Database: Send + Sync + 'static {
    type Records<'a, R: Record>: RecordRepository<R> + Send + Sync
    where
        Self: 'a;

    /// Run pending migrations.
    fn migrate(&self) -> impl Future<Output = DbResult<()>> + Send;

    /// Check that the store answers a trivial query.
    fn ping(&self) -> impl Future<Output = DbResult<()>> + Send;

    /// Get the repository for records of type `R`.
    fn records<R: Record>(&self) -> Self::Records<'_, R>;
}
