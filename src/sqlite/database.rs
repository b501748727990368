//! SQL execution wrapper: open/create, prepare/bind/step/fetch, and the
//! field-list driven INSERT/UPDATE helpers.

use crate::sqlite::error::{DbError, DbResult};
use crate::sqlite::field::Field;
use crate::sqlite::row::{ResultSet, Row};
use crate::sqlite::value::Value;
use rusqlite::{Connection, OpenFlags, Statement};
use std::cell::RefCell;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// Magic bytes at offset 0 of every SQLite 3 database file.
pub const DATABASE_HEADER: &[u8; 16] = b"SQLite format 3\0";

const DEFAULT_PRAGMAS: &str = "PRAGMA foreign_keys=ON;";

/// What sits at a database path before we touch it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileState {
    Missing,
    Empty,
    Valid,
    Invalid,
}

/// Inspect `path` and compare its header with [`DATABASE_HEADER`].
pub fn file_state(path: &Path) -> io::Result<FileState> {
    let mut file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(FileState::Missing),
        Err(e) => return Err(e),
    };
    if file.metadata()?.is_dir() {
        return Ok(FileState::Invalid);
    }

    let mut head = Vec::with_capacity(DATABASE_HEADER.len());
    file.by_ref()
        .take(DATABASE_HEADER.len() as u64)
        .read_to_end(&mut head)?;

    Ok(match head.len() {
        0 => FileState::Empty,
        _ if head.as_slice() == DATABASE_HEADER => FileState::Valid,
        _ => FileState::Invalid,
    })
}

/// Table and column names are interpolated, so only plain identifiers pass.
fn check_identifier(name: &str) -> DbResult<()> {
    let mut chars = name.chars();
    let ok = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if ok {
        Ok(())
    } else {
        Err(DbError::InvalidIdentifier(name.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct LastError {
    code: Option<i32>,
    message: String,
}

pub struct Database {
    conn: Connection,
    path: Option<PathBuf>,
    last_error: RefCell<Option<LastError>>,
}

impl Database {
    fn with_connection(conn: Connection, path: Option<PathBuf>) -> DbResult<Self> {
        let db = Self {
            conn,
            path,
            last_error: RefCell::new(None),
        };
        db.exec(DEFAULT_PRAGMAS)?;
        Ok(db)
    }

    /// Open an existing database file. The file must carry the SQLite header.
    pub fn open(path: &Path) -> DbResult<Self> {
        match file_state(path)? {
            FileState::Missing => return Err(DbError::NotFound(path.to_path_buf())),
            FileState::Empty | FileState::Invalid => {
                return Err(DbError::NotADatabase(path.to_path_buf()));
            }
            FileState::Valid => {}
        }

        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_WRITE)?;
        debug!(path = %path.display(), "database opened");
        Self::with_connection(conn, Some(path.to_path_buf()))
    }

    /// Create a new database file and run `schema` on it.
    ///
    /// A file that already is a SQLite database is never reused, and a
    /// non-empty file with a foreign header is left untouched. When the
    /// schema fails the file is removed again.
    pub fn create(path: &Path, schema: &str) -> DbResult<Self> {
        match file_state(path)? {
            FileState::Valid => return Err(DbError::AlreadyExists(path.to_path_buf())),
            FileState::Invalid => return Err(DbError::NotADatabase(path.to_path_buf())),
            FileState::Missing | FileState::Empty => {}
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
        )?;
        let db = Self::with_connection(conn, Some(path.to_path_buf()))?;
        if let Err(e) = db.exec(schema) {
            if let Err(rm) = db.remove() {
                error!(path = %path.display(), error = %rm, "cannot remove partial database");
            }
            return Err(e);
        }
        debug!(path = %path.display(), "database created");
        Ok(db)
    }

    pub fn open_or_create(path: &Path, schema: &str) -> DbResult<Self> {
        match file_state(path)? {
            FileState::Missing | FileState::Empty => Self::create(path, schema),
            _ => Self::open(path),
        }
    }

    /// Private in-memory database, mostly for tests.
    pub fn open_in_memory(schema: &str) -> DbResult<Self> {
        let db = Self::with_connection(Connection::open_in_memory()?, None)?;
        db.exec(schema)?;
        Ok(db)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Version of the linked SQLite library.
    pub fn version() -> &'static str {
        rusqlite::version()
    }

    /// Extended result code of the last failed call, if any.
    pub fn error_code(&self) -> Option<i32> {
        self.last_error.borrow().as_ref().and_then(|e| e.code)
    }

    /// Message of the last failed call, if any.
    pub fn error_message(&self) -> Option<String> {
        self.last_error.borrow().as_ref().map(|e| e.message.clone())
    }

    /// Record and log a failure, then hand it back to the caller.
    fn fail(&self, op: &str, err: DbError) -> DbError {
        let code = err.sqlite_code();
        error!(op, code = ?code, "sqlite error: {err}");
        *self.last_error.borrow_mut() = Some(LastError {
            code,
            message: err.to_string(),
        });
        err
    }

    fn guard<T>(&self, op: &str, res: DbResult<T>) -> DbResult<T> {
        res.map_err(|e| self.fail(op, e))
    }

    /// Run one or more statements that produce no rows.
    pub fn exec(&self, sql: &str) -> DbResult<()> {
        debug!(sql, "exec");
        self.guard("exec", self.conn.execute_batch(sql).map_err(DbError::from))
    }

    fn prepare(&self, sql: &str) -> DbResult<Statement<'_>> {
        debug!(sql, "prepare");
        Ok(self.conn.prepare(sql)?)
    }

    /// Bind every field to its `:name` placeholder.
    fn bind_fields(stmt: &mut Statement<'_>, fields: &[Field]) -> DbResult<()> {
        for f in fields {
            let placeholder = format!(":{}", f.name());
            let idx = stmt
                .parameter_index(&placeholder)?
                .ok_or(rusqlite::Error::InvalidParameterName(placeholder))?;
            stmt.raw_bind_parameter(idx, f.value())?;
        }
        Ok(())
    }

    fn step(stmt: &mut Statement<'_>) -> DbResult<usize> {
        Ok(stmt.raw_execute()?)
    }

    /// Step through all rows, turning each column into a field tagged with
    /// its storage class.
    fn fetch<F>(stmt: &mut Statement<'_>, mut handle: F) -> DbResult<usize>
    where
        F: FnMut(Row),
    {
        let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        if names.is_empty() {
            return Ok(0);
        }

        let mut count = 0;
        let mut rows = stmt.raw_query();
        while let Some(r) = rows.next()? {
            let mut row = Row::new();
            for (i, name) in names.iter().enumerate() {
                let value = Value::from(r.get_ref(i)?);
                row.append(Field::new(name, value)?)?;
            }
            handle(row);
            count += 1;
        }
        Ok(count)
    }

    fn run_select<F>(&self, sql: &str, params: &[Field], handle: F) -> DbResult<usize>
    where
        F: FnMut(Row),
    {
        let mut stmt = self.prepare(sql)?;
        Self::bind_fields(&mut stmt, params)?;
        Self::fetch(&mut stmt, handle)
    }

    /// Run a query and materialise the whole result.
    pub fn select(&self, sql: &str, params: &[Field]) -> DbResult<ResultSet> {
        let mut out = ResultSet::new();
        let res = self.run_select(sql, params, |row| out.push(row));
        self.guard("select", res)?;
        Ok(out)
    }

    /// Run a query and hand each row to `handle`; returns the row count.
    pub fn select_and_handle<F>(
        &self,
        sql: &str,
        params: &[Field],
        mut handle: F,
    ) -> DbResult<usize>
    where
        F: FnMut(&Row),
    {
        let res = self.run_select(sql, params, |row| handle(&row));
        self.guard("select", res)
    }

    /// `INSERT INTO table (a, b) VALUES (:a, :b)`; returns the new rowid.
    pub fn insert(&self, table: &str, fields: &[Field]) -> DbResult<i64> {
        let res = self.run_insert(table, fields);
        self.guard("insert", res)
    }

    fn run_insert(&self, table: &str, fields: &[Field]) -> DbResult<i64> {
        if fields.is_empty() {
            return Err(DbError::NoFields(table.to_string()));
        }
        check_identifier(table)?;
        for f in fields {
            check_identifier(f.name())?;
        }

        let names: Vec<&str> = fields.iter().map(Field::name).collect();
        let binds: Vec<String> = names.iter().map(|n| format!(":{n}")).collect();
        let sql = format!(
            "INSERT INTO {table} ({}) VALUES ({})",
            names.join(","),
            binds.join(",")
        );

        let mut stmt = self.prepare(&sql)?;
        Self::bind_fields(&mut stmt, fields)?;
        Self::step(&mut stmt)?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Update one row. The first field is the integer primary key and
    /// selects the row; the remaining fields are assigned.
    pub fn update(&self, table: &str, fields: &[Field]) -> DbResult<usize> {
        let res = self.run_update(table, fields);
        self.guard("update", res)
    }

    fn run_update(&self, table: &str, fields: &[Field]) -> DbResult<usize> {
        let Some((key, rest)) = fields.split_first() else {
            return Err(DbError::NoFields(table.to_string()));
        };
        if key.as_i64().is_err() {
            return Err(DbError::InvalidPrimaryKey(key.name().to_string()));
        }
        if rest.is_empty() {
            return Err(DbError::NoFields(table.to_string()));
        }
        check_identifier(table)?;
        for f in fields {
            check_identifier(f.name())?;
        }

        let assigns: Vec<String> = rest
            .iter()
            .map(|f| format!("{0}=:{0}", f.name()))
            .collect();
        let sql = format!(
            "UPDATE {table} SET {} WHERE {1}=:{1}",
            assigns.join(","),
            key.name()
        );

        let mut stmt = self.prepare(&sql)?;
        Self::bind_fields(&mut stmt, fields)?;
        Self::step(&mut stmt)
    }

    /// Delete the row whose `id_column` equals `id`; returns rows removed.
    pub fn delete(&self, table: &str, id_column: &str, id: i64) -> DbResult<usize> {
        let res = self.run_delete(table, id_column, id);
        self.guard("delete", res)
    }

    fn run_delete(&self, table: &str, id_column: &str, id: i64) -> DbResult<usize> {
        check_identifier(table)?;
        check_identifier(id_column)?;
        let sql = format!("DELETE FROM {table} WHERE {id_column}=:id");
        let mut stmt = self.prepare(&sql)?;
        Self::bind_fields(&mut stmt, &[Field::new("id", id)?])?;
        Self::step(&mut stmt)
    }

    pub fn count(&self, table: &str) -> DbResult<i64> {
        check_identifier(table).map_err(|e| self.fail("count", e))?;
        let sql = format!("SELECT COUNT(*) AS count FROM {table}");
        self.single_count(&sql, &[])
    }

    pub fn count_where_int(&self, table: &str, column: &str, value: i64) -> DbResult<i64> {
        check_identifier(table)
            .and_then(|_| check_identifier(column))
            .map_err(|e| self.fail("count", e))?;
        let sql = format!("SELECT COUNT(*) AS count FROM {table} WHERE {column}=:value");
        let param = Field::new("value", value).map_err(|e| self.fail("count", e.into()))?;
        self.single_count(&sql, &[param])
    }

    fn single_count(&self, sql: &str, params: &[Field]) -> DbResult<i64> {
        let result = self.select(sql, params)?;
        let res = match result.first() {
            Some(row) => row.get_i64("count").map_err(DbError::from),
            None => Ok(0),
        };
        self.guard("count", res)
    }

    pub fn last_insert_rowid(&self) -> i64 {
        self.conn.last_insert_rowid()
    }

    pub fn begin_transaction(&self) -> DbResult<()> {
        self.exec("BEGIN IMMEDIATE TRANSACTION")
    }

    pub fn commit_transaction(&self) -> DbResult<()> {
        self.exec("COMMIT TRANSACTION")
    }

    pub fn rollback_transaction(&self) -> DbResult<()> {
        self.exec("ROLLBACK TRANSACTION")
    }

    /// Commit on success, roll back otherwise.
    pub fn finish_transaction(&self, success: bool) -> DbResult<()> {
        if success {
            self.commit_transaction()
        } else {
            self.rollback_transaction()
        }
    }

    pub fn close(self) -> DbResult<()> {
        self.conn.close().map_err(|(_, e)| DbError::from(e))
    }

    /// Close the handle and delete the database file.
    pub fn remove(self) -> DbResult<()> {
        let path = self.path.clone();
        self.close()?;
        if let Some(p) = path {
            fs::remove_file(p)?;
        }
        Ok(())
    }
}
