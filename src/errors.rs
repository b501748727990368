//! Unified application error type.
//! All modules (sqlite, models, core, cli, utils) return AppError to keep the
//! error handling consistent and easy to manage.

use crate::sqlite::{DbError, FieldError};
use std::io;
use thiserror::Error;

/// Fixed text shown to the user for any failed SQL statement.
pub const DB_FAILURE_MESSAGE: &str = "Database operation failed; see the log for details";

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] DbError),

    #[error("Cannot open or create database {path}: {source}")]
    DbOpen {
        path: String,
        #[source]
        source: DbError,
    },

    #[error("Invalid record: {0}")]
    Field(#[from] FieldError),

    // ---------------------------
    // Validation errors
    // ---------------------------
    #[error("{0} cannot be empty")]
    EmptyValue(&'static str),

    #[error("Invalid time format: {0} (expected HH:MM or HH:MM:SS)")]
    InvalidTime(String),

    #[error("Invalid duration: {0} (expected HH:MM:SS, MM:SS or seconds)")]
    InvalidDuration(String),

    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    // ---------------------------
    // Logic errors
    // ---------------------------
    #[error("Company not found: {0}")]
    CompanyNotFound(String),

    #[error("Company '{0}' is not active")]
    CompanyInactive(String),

    #[error("Company '{name}' still has {timers} timer record(s); deactivate it instead")]
    CompanyInUse { name: String, timers: i64 },

    #[error("Invalid timer record: {0}")]
    InvalidTimer(String),

    #[error("Timer record not found: {0}")]
    TimerNotFound(i64),

    #[error("Nothing to do: {0}")]
    NothingToDo(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// Text for the terminal. SQL failures are reduced to a fixed message;
    /// the detail has already been logged by the database layer.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Db(DbError::Sqlite(_)) => DB_FAILURE_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        AppError::Db(DbError::Sqlite(e))
    }
}

pub type AppResult<T> = Result<T, AppError>;
