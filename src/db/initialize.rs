use crate::errors::{AppError, AppResult};
use crate::sqlite::Database;
use std::fs;
use std::path::Path;
use tracing::info;

/// Schema applied once, when the database file is first created.
pub const SCHEMA: &str = r#"
CREATE TABLE company
(
    id       INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
    shortcut TEXT    NOT NULL COLLATE NOCASE UNIQUE,
    name     TEXT    NOT NULL COLLATE NOCASE UNIQUE,
    used     INTEGER NOT NULL CHECK(used==0 OR used==1) DEFAULT 1
);
CREATE TABLE timer
(
    id         INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
    company_id INTEGER NOT NULL,
    start      INTEGER NOT NULL,
    finish     INTEGER NOT NULL,
    FOREIGN KEY (company_id) REFERENCES company(id)
);
CREATE INDEX idx_timer_company ON timer(company_id);
"#;

/// Open the database at `path`, creating the file (and its directory) with
/// the schema when it does not exist yet.
pub fn open_db(path: &str) -> AppResult<Database> {
    let p = Path::new(path);
    if let Some(parent) = p.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let db = Database::open_or_create(p, SCHEMA).map_err(|source| AppError::DbOpen {
        path: path.to_string(),
        source,
    })?;
    info!(path, "database ready");
    Ok(db)
}

/// Open an existing database; never creates one.
pub fn open_existing_db(path: &str) -> AppResult<Database> {
    Database::open(Path::new(path)).map_err(|source| AppError::DbOpen {
        path: path.to_string(),
        source,
    })
}

/// In-memory database with the application schema.
pub fn memory_db() -> AppResult<Database> {
    Ok(Database::open_in_memory(SCHEMA)?)
}
