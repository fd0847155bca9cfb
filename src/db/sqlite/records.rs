//! SQLite RecordRepository implementation.
//!
//! One implementation serves every [`Record`] type. Table and column names
//! come from the record's constants; values are always bound.

use std::marker::PhantomData;

use sqlx::query::Query;
use sqlx::sqlite::SqliteArguments;
use sqlx::{Sqlite, SqlitePool};

use crate::db::{DbError, DbResult, FieldValue, Record, RecordId, RecordRepository};

type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

/// SQLx-backed repository for records of type `R`.
pub struct SqliteRecordRepository<'a, R> {
    pub(crate) pool: &'a SqlitePool,
    _record: PhantomData<fn() -> R>,
}

impl<'a, R> SqliteRecordRepository<'a, R> {
    pub(crate) fn new(pool: &'a SqlitePool) -> Self {
        Self {
            pool,
            _record: PhantomData,
        }
    }
}

pub(crate) fn select_sql<R: Record>() -> String {
    format!("SELECT id, {} FROM {}", R::COLUMNS.join(", "), R::TABLE)
}

pub(crate) fn insert_sql<R: Record>() -> String {
    let placeholders = vec!["?"; R::COLUMNS.len()].join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        R::TABLE,
        R::COLUMNS.join(", "),
        placeholders
    )
}

pub(crate) fn update_sql<R: Record>() -> String {
    let assignments: Vec<String> = R::COLUMNS
        .iter()
        .map(|column| format!("{} = ?", column))
        .collect();
    format!(
        "UPDATE {} SET {} WHERE id = ?",
        R::TABLE,
        assignments.join(", ")
    )
}

pub(crate) fn set_field_sql<R: Record>(column: &str) -> DbResult<String> {
    if !R::COLUMNS.contains(&column) {
        return Err(DbError::Validation {
            message: format!("{} has no column '{}'", R::TABLE, column),
        });
    }
    Ok(format!("UPDATE {} SET {} = ? WHERE id = ?", R::TABLE, column))
}

fn bind_value<'q>(query: SqliteQuery<'q>, value: FieldValue) -> SqliteQuery<'q> {
    match value {
        FieldValue::Text(text) => query.bind(text),
        FieldValue::Real(number) => query.bind(number),
        FieldValue::Bool(flag) => query.bind(flag),
    }
}

fn bind_fields<'q, R: Record>(mut query: SqliteQuery<'q>, fields: &R::Fields) -> SqliteQuery<'q> {
    for value in R::values(fields) {
        query = bind_value(query, value);
    }
    query
}

impl<'a, R: Record> RecordRepository<R> for SqliteRecordRepository<'a, R> {
    async fn list(&self) -> DbResult<Vec<R>> {
        let sql = format!("{} ORDER BY id ASC", select_sql::<R>());

        let records = sqlx::query_as::<_, R>(&sql)
            .fetch_all(self.pool)
            .await?;

        Ok(records)
    }

    async fn get(&self, id: RecordId) -> DbResult<R> {
        let sql = format!("{} WHERE id = ?", select_sql::<R>());

        let record = sqlx::query_as::<_, R>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        record.ok_or_else(|| DbError::not_found(R::ENTITY, id))
    }

    async fn insert(&self, fields: &R::Fields) -> DbResult<RecordId> {
        let sql = insert_sql::<R>();

        let result = bind_fields::<R>(sqlx::query(&sql), fields)
            .execute(self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    async fn update(&self, id: RecordId, fields: &R::Fields) -> DbResult<u64> {
        let sql = update_sql::<R>();

        let result = bind_fields::<R>(sqlx::query(&sql), fields)
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn set_field(
        &self,
        id: RecordId,
        column: &'static str,
        value: FieldValue,
    ) -> DbResult<u64> {
        let sql = set_field_sql::<R>(column)?;

        let result = bind_value(sqlx::query(&sql), value)
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: RecordId) -> DbResult<u64> {
        let sql = format!("DELETE FROM {} WHERE id = ?", R::TABLE);

        let result = sqlx::query(&sql).bind(id).execute(self.pool).await?;

        Ok(result.rows_affected())
    }
}
