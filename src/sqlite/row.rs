//! One result row as a column-name → [`Field`] map.

use crate::sqlite::error::FieldError;
use crate::sqlite::field::Field;
use std::collections::HashMap;

/// Ordered, fully materialised query result.
pub type ResultSet = Vec<Row>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    fields: HashMap<String, Field>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field; a second field with the same column name is rejected.
    pub fn append(&mut self, field: Field) -> Result<(), FieldError> {
        if self.fields.contains_key(field.name()) {
            return Err(FieldError::DuplicateColumn(field.name().to_string()));
        }
        self.fields.insert(field.name().to_string(), field);
        Ok(())
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn get(&self, name: &str) -> Result<&Field, FieldError> {
        self.field(name)
            .ok_or_else(|| FieldError::MissingColumn(name.to_string()))
    }

    pub fn get_i64(&self, name: &str) -> Result<i64, FieldError> {
        self.get(name)?.as_i64()
    }

    pub fn get_text(&self, name: &str) -> Result<&str, FieldError> {
        self.get(name)?.as_text()
    }

    pub fn get_bool(&self, name: &str) -> Result<bool, FieldError> {
        self.get(name)?.as_bool()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.values()
    }
}
