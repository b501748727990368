//! A named column value with checked accessors.

use crate::sqlite::error::FieldError;
use crate::sqlite::value::{Value, ValueType};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    name: String,
    value: Value,
}

impl Field {
    /// Build a field; the name is trimmed and must not be empty.
    pub fn new(name: &str, value: impl Into<Value>) -> Result<Self, FieldError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FieldError::EmptyName);
        }
        Ok(Self {
            name: name.to_string(),
            value: value.into(),
        })
    }

    /// Field holding SQL NULL.
    pub fn null(name: &str) -> Result<Self, FieldError> {
        Self::new(name, Value::Null)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn value_type(&self) -> ValueType {
        self.value.value_type()
    }

    pub fn is_null(&self) -> bool {
        matches!(self.value, Value::Null)
    }

    fn mismatch(&self, expected: ValueType) -> FieldError {
        FieldError::TypeMismatch {
            name: self.name.clone(),
            expected,
            found: self.value_type(),
        }
    }

    pub fn as_i64(&self) -> Result<i64, FieldError> {
        match self.value {
            Value::Int(v) => Ok(v),
            _ => Err(self.mismatch(ValueType::Int)),
        }
    }

    fn out_of_range(&self, target: &'static str) -> FieldError {
        FieldError::OutOfRange {
            name: self.name.clone(),
            target,
        }
    }

    pub fn as_i32(&self) -> Result<i32, FieldError> {
        i32::try_from(self.as_i64()?).map_err(|_| self.out_of_range("i32"))
    }

    pub fn as_u32(&self) -> Result<u32, FieldError> {
        u32::try_from(self.as_i64()?).map_err(|_| self.out_of_range("u32"))
    }

    pub fn as_u64(&self) -> Result<u64, FieldError> {
        u64::try_from(self.as_i64()?).map_err(|_| self.out_of_range("u64"))
    }

    pub fn as_f64(&self) -> Result<f64, FieldError> {
        match self.value {
            Value::Float(v) => Ok(v),
            _ => Err(self.mismatch(ValueType::Float)),
        }
    }

    /// Finite values beyond the `f32` range are rejected; NaN and infinities pass through.
    pub fn as_f32(&self) -> Result<f32, FieldError> {
        let v = self.as_f64()?;
        if v.is_finite() && v.abs() > f64::from(f32::MAX) {
            return Err(self.out_of_range("f32"));
        }
        Ok(v as f32)
    }

    pub fn as_text(&self) -> Result<&str, FieldError> {
        match &self.value {
            Value::Text(v) => Ok(v),
            _ => Err(self.mismatch(ValueType::Text)),
        }
    }

    pub fn as_blob(&self) -> Result<&[u8], FieldError> {
        match &self.value {
            Value::Blob(v) => Ok(v),
            _ => Err(self.mismatch(ValueType::Blob)),
        }
    }

    /// Int 1 is true, any other integer is false.
    pub fn as_bool(&self) -> Result<bool, FieldError> {
        self.as_i64().map(|v| v == 1)
    }
}
