use crate::core::stats::{self, StatFilter, StatRecord};
use crate::errors::{AppError, AppResult};
use crate::sqlite::Database;
use crate::ui::messages::ask_confirmation;
use crate::utils::path::expand_tilde;
use chrono::NaiveDate;
use clap::ValueEnum;
use csv::Writer;
use std::fs;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

pub struct ExportRequest<'a> {
    pub format: ExportFormat,
    pub file: &'a str,
    pub filter: StatFilter,
    pub force: bool,
}

/// Check whether `path` may be written. An existing file needs `force` or
/// a positive answer read from `input`.
pub fn ensure_writable<R: BufRead>(path: &Path, force: bool, input: &mut R) -> AppResult<()> {
    if path.is_dir() {
        return Err(AppError::Export(format!("'{}' is a directory", path.display())));
    }
    if !path.exists() || force {
        return Ok(());
    }

    let prompt = format!("The file '{}' already exists. Overwrite it?", path.display());
    if ask_confirmation(&prompt, input) {
        Ok(())
    } else {
        Err(AppError::Export(
            "cancelled: existing file not overwritten".into(),
        ))
    }
}

pub fn write_csv(path: &Path, records: &[StatRecord]) -> AppResult<()> {
    let mut wtr = Writer::from_path(path)?;
    for r in records {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json(path: &Path, records: &[StatRecord]) -> AppResult<()> {
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json)?;
    Ok(())
}

/// Export the statistic records selected by `req.filter`.
/// Returns the target path and the number of records written;
/// nothing is written when there are no records.
pub fn export<R: BufRead>(
    db: &Database,
    req: &ExportRequest<'_>,
    today: NaiveDate,
    input: &mut R,
) -> AppResult<(PathBuf, usize)> {
    if req.file.trim().is_empty() {
        return Err(AppError::EmptyValue("Output file"));
    }
    let path = expand_tilde(req.file.trim());
    ensure_writable(&path, req.force, input)?;

    let records = stats::load_records(db, &req.filter, today)?;
    if records.is_empty() {
        return Ok((path, 0));
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    match req.format {
        ExportFormat::Csv => write_csv(&path, &records)?,
        ExportFormat::Json => write_json(&path, &records)?,
    }
    info!(
        path = %path.display(),
        records = records.len(),
        format = req.format.extension(),
        "export written"
    );
    Ok((path, records.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::memory_db;
    use crate::models::{Company, Timer};
    use std::io::Cursor;

    fn seeded() -> Database {
        let db = memory_db().unwrap();
        let mut c = Company::with_data("bee", "Beesoft");
        c.save(&db).unwrap();
        Timer::with_data(c.id, 1_700_000_000, 1_700_000_900)
            .save(&db)
            .unwrap();
        db
    }

    fn request(file: &str, format: ExportFormat, force: bool) -> ExportRequest<'_> {
        ExportRequest {
            format,
            file,
            filter: StatFilter::default(),
            force,
        }
    }

    #[test]
    fn csv_has_header_and_rows() {
        let db = seeded();
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("out.csv");
        let name = file.to_string_lossy().to_string();

        let (_, n) = export(
            &db,
            &request(&name, ExportFormat::Csv, false),
            chrono::Local::now().date_naive(),
            &mut Cursor::new(""),
        )
        .unwrap();
        assert_eq!(n, 1);

        let text = fs::read_to_string(&file).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "id,company_id,company,start,finish,seconds,worked"
        );
        assert!(lines.next().unwrap().contains("Beesoft"));
    }

    #[test]
    fn json_is_an_array_of_records() {
        let db = seeded();
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("out.json");
        let name = file.to_string_lossy().to_string();

        export(
            &db,
            &request(&name, ExportFormat::Json, false),
            chrono::Local::now().date_naive(),
            &mut Cursor::new(""),
        )
        .unwrap();

        let v: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&file).unwrap()).unwrap();
        assert_eq!(v[0]["company"], "Beesoft");
        assert_eq!(v[0]["seconds"], 900);
        assert_eq!(v[0]["worked"], "0h 15min");
    }

    #[test]
    fn existing_file_needs_force_or_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("taken.csv");
        fs::write(&file, "old").unwrap();

        assert!(matches!(
            ensure_writable(&file, false, &mut Cursor::new("n\n")),
            Err(AppError::Export(_))
        ));
        ensure_writable(&file, false, &mut Cursor::new("yes\n")).unwrap();
        ensure_writable(&file, true, &mut Cursor::new("")).unwrap();
    }
}
