//! Domain models for the record store.
//!
//! Every managed table is described by a type implementing [`Record`]. The
//! generic repository and handler layers only ever talk to that trait, so a
//! new table needs a struct, its fields payload, and a migration.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use sqlx::{FromRow, sqlite::SqliteRow};
use utoipa::ToSchema;

use crate::db::{DbError, DbResult};

/// Store-assigned integer identifier.
pub type RecordId = i64;

/// A single bound column value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Real(f64),
    Bool(bool),
}

/// A row of a single managed table.
///
/// `COLUMNS` lists the mutable columns in the order [`Record::values`]
/// produces them. The `id` column is implicit.
pub trait Record:
    Serialize + for<'r> FromRow<'r, SqliteRow> + Clone + Send + Sync + Unpin + 'static
{
    /// Every mutable field; the body of create and update requests.
    type Fields: DeserializeOwned + Clone + Send + Sync + 'static;

    /// Human-readable entity name, e.g. `Transaction`.
    const ENTITY: &'static str;
    /// Human-readable collection name used in list messages.
    const COLLECTION: &'static str;
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];

    fn id(&self) -> RecordId;

    fn fields(&self) -> Self::Fields;

    /// Assemble a record from a store-assigned id and its fields.
    fn from_parts(id: RecordId, fields: Self::Fields) -> Self;

    /// Column values in `COLUMNS` order.
    fn values(fields: &Self::Fields) -> Vec<FieldValue>;

    /// Reject field values the table should never hold.
    fn validate(fields: &Self::Fields) -> DbResult<()>;
}

fn require_text(field: &str, value: &str) -> DbResult<()> {
    if value.trim().is_empty() {
        return Err(DbError::Validation {
            message: format!("{} must not be empty", field),
        });
    }
    Ok(())
}

// =============================================================================
// Transactions
// =============================================================================

/// A financial transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Transaction {
    #[schema(value_type = i64, example = 1)]
    pub id: RecordId,
    #[schema(example = "coffee")]
    pub description: String,
    #[schema(example = 3.5)]
    pub amount: f64,
}

/// Mutable transaction fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TransactionFields {
    #[schema(example = "coffee")]
    pub description: String,
    #[schema(example = 3.5)]
    pub amount: f64,
}

impl Record for Transaction {
    type Fields = TransactionFields;

    const ENTITY: &'static str = "Transaction";
    const COLLECTION: &'static str = "transactions";
    const TABLE: &'static str = "transactions";
    const COLUMNS: &'static [&'static str] = &["description", "amount"];

    fn id(&self) -> RecordId {
        self.id
    }

    fn fields(&self) -> TransactionFields {
        TransactionFields {
            description: self.description.clone(),
            amount: self.amount,
        }
    }

    fn from_parts(id: RecordId, fields: TransactionFields) -> Self {
        Self {
            id,
            description: fields.description,
            amount: fields.amount,
        }
    }

    fn values(fields: &TransactionFields) -> Vec<FieldValue> {
        vec![
            FieldValue::Text(fields.description.clone()),
            FieldValue::Real(fields.amount),
        ]
    }

    fn validate(fields: &TransactionFields) -> DbResult<()> {
        require_text("description", &fields.description)?;
        if !fields.amount.is_finite() {
            return Err(DbError::Validation {
                message: "amount must be a finite number".to_string(),
            });
        }
        Ok(())
    }
}

// =============================================================================
// Students
// =============================================================================

/// An enrolled student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Student {
    #[schema(value_type = i64, example = 1)]
    pub id: RecordId,
    #[schema(example = "Ada")]
    pub name: String,
}

/// Mutable student fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StudentFields {
    #[schema(example = "Ada")]
    pub name: String,
}

impl Record for Student {
    type Fields = StudentFields;

    const ENTITY: &'static str = "Student";
    const COLLECTION: &'static str = "students";
    const TABLE: &'static str = "students";
    const COLUMNS: &'static [&'static str] = &["name"];

    fn id(&self) -> RecordId {
        self.id
    }

    fn fields(&self) -> StudentFields {
        StudentFields {
            name: self.name.clone(),
        }
    }

    fn from_parts(id: RecordId, fields: StudentFields) -> Self {
        Self {
            id,
            name: fields.name,
        }
    }

    fn values(fields: &StudentFields) -> Vec<FieldValue> {
        vec![FieldValue::Text(fields.name.clone())]
    }

    fn validate(fields: &StudentFields) -> DbResult<()> {
        require_text("name", &fields.name)
    }
}

// =============================================================================
// Attendance
// =============================================================================

/// A pupil on the attendance roll and whether they are present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Attendance {
    #[schema(value_type = i64, example = 1)]
    pub id: RecordId,
    #[schema(example = "Budi")]
    pub name: String,
    #[schema(example = false)]
    pub present: bool,
}

/// Mutable attendance fields. `present` defaults to false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AttendanceFields {
    #[schema(example = "Budi")]
    pub name: String,
    #[serde(default)]
    #[schema(example = false)]
    pub present: bool,
}

impl Record for Attendance {
    type Fields = AttendanceFields;

    const ENTITY: &'static str = "Attendance record";
    const COLLECTION: &'static str = "attendance records";
    const TABLE: &'static str = "attendance";
    const COLUMNS: &'static [&'static str] = &["name", "present"];

    fn id(&self) -> RecordId {
        self.id
    }

    fn fields(&self) -> AttendanceFields {
        AttendanceFields {
            name: self.name.clone(),
            present: self.present,
        }
    }

    fn from_parts(id: RecordId, fields: AttendanceFields) -> Self {
        Self {
            id,
            name: fields.name,
            present: fields.present,
        }
    }

    fn values(fields: &AttendanceFields) -> Vec<FieldValue> {
        vec![
            FieldValue::Text(fields.name.clone()),
            FieldValue::Bool(fields.present),
        ]
    }

    fn validate(fields: &AttendanceFields) -> DbResult<()> {
        require_text("name", &fields.name)
    }
}
