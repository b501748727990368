//! Thin SQL layer over SQLite: typed fields, generic rows and a database
//! handle with field-list driven INSERT/UPDATE.

pub mod database;
pub mod error;
pub mod field;
pub mod row;
pub mod value;

pub use database::{DATABASE_HEADER, Database, FileState, file_state};
pub use error::{DbError, DbResult, FieldError};
pub use field::Field;
pub use row::{ResultSet, Row};
pub use value::{Value, ValueType};
