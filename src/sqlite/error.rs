//! Errors of the SQL wrapper layer.

use crate::sqlite::value::ValueType;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    #[error("Field name cannot be empty")]
    EmptyName,

    #[error("Field '{name}' holds {found}, not {expected}")]
    TypeMismatch {
        name: String,
        expected: ValueType,
        found: ValueType,
    },

    #[error("Field '{name}' does not fit in {target}")]
    OutOfRange { name: String, target: &'static str },

    #[error("Column '{0}' already present in row")]
    DuplicateColumn(String),

    #[error("Column '{0}' not present in row")]
    MissingColumn(String),
}

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("Database not found: {0}")]
    NotFound(PathBuf),

    #[error("Not a SQLite database: {0}")]
    NotADatabase(PathBuf),

    #[error("No fields given for {0}")]
    NoFields(String),

    #[error("First field '{0}' must be an integer primary key")]
    InvalidPrimaryKey(String),

    #[error("Invalid SQL identifier: '{0}'")]
    InvalidIdentifier(String),

    #[error("Row conversion error: {0}")]
    Field(#[from] FieldError),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl DbError {
    /// Extended SQLite result code when the error came from the engine.
    pub fn sqlite_code(&self) -> Option<i32> {
        match self {
            DbError::Sqlite(rusqlite::Error::SqliteFailure(e, _)) => Some(e.extended_code),
            _ => None,
        }
    }

    /// True for UNIQUE / CHECK / FOREIGN KEY violations.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            DbError::Sqlite(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation
        )
    }
}

pub type DbResult<T> = Result<T, DbError>;
