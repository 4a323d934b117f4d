use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::db::table::core::constraint::Operator;
use crate::db::table::core::value::DataType;

pub type Result<T> = std::result::Result<T, StorageError>;

/// Every failure a command can report. Commands never retry or log these;
/// they abort and hand the error to the caller.
#[derive(Error, Debug)]
pub enum StorageError {
    /// A schema flag forbids the mutation (autoincrement, NOT NULL, UNIQUE).
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// Ordering operators are not defined for BOOLEAN and TEXT columns.
    #[error("invalid binary operator {operator} on type {data_type}")]
    UnsupportedOperator {
        operator: Operator,
        data_type: DataType,
    },

    #[error("column `{column}` does not exist in table `{table}`")]
    UnknownColumn { column: String, table: String },

    #[error("column `{column}` expects {expected}, found {found}")]
    TypeMismatch {
        column: String,
        expected: DataType,
        found: String,
    },

    #[error("failed to open row file '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to lock row file '{path}': {source}")]
    Lock {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Rows written before the failing one stay written.
    #[error("failed to write column `{column}` of row {row}: {source}")]
    Write {
        row: u64,
        column: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to read row {row}: {source}")]
    Read {
        row: u64,
        #[source]
        source: io::Error,
    },

    #[error("row {row}, column `{column}` is corrupt: {reason}")]
    Corrupt {
        row: u64,
        column: String,
        reason: String,
    },
}

impl StorageError {
    /// True for errors raised by validation, before any file was touched.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            StorageError::ConstraintViolation(_)
                | StorageError::UnsupportedOperator { .. }
                | StorageError::UnknownColumn { .. }
                | StorageError::TypeMismatch { .. }
        )
    }
}
