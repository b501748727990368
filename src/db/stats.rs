use crate::errors::AppResult;
use crate::sqlite::Database;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::time::epoch_to_string;
use std::fs;

/// Summary shown by `db --info`.
#[derive(Debug, Clone, PartialEq)]
pub struct DbInfo {
    pub path: String,
    pub size_bytes: u64,
    pub sqlite_version: &'static str,
    pub companies: i64,
    pub active_companies: i64,
    pub timers: i64,
    pub first_start: Option<i64>,
    pub last_start: Option<i64>,
    pub tracked_secs: i64,
}

pub fn collect_info(db: &Database) -> AppResult<DbInfo> {
    let path = db
        .path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| ":memory:".to_string());
    let size_bytes = db
        .path()
        .and_then(|p| fs::metadata(p).ok())
        .map(|m| m.len())
        .unwrap_or(0);

    let rows = db.select(
        "SELECT MIN(start) AS first, MAX(start) AS last, \
         COALESCE(SUM(finish - start), 0) AS tracked FROM timer",
        &[],
    )?;
    let (first_start, last_start, tracked_secs) = match rows.first() {
        Some(r) => (
            r.get("first")?.as_i64().ok(),
            r.get("last")?.as_i64().ok(),
            r.get_i64("tracked")?,
        ),
        None => (None, None, 0),
    };

    Ok(DbInfo {
        path,
        size_bytes,
        sqlite_version: Database::version(),
        companies: db.count("company")?,
        active_companies: db.count_where_int("company", "used", 1)?,
        timers: db.count("timer")?,
        first_start,
        last_start,
        tracked_secs,
    })
}

pub fn print_db_info(info: &DbInfo) {
    println!();
    let size_kb = info.size_bytes as f64 / 1024.0;
    let dash = || format!("{GREY}--{RESET}");

    println!("{CYAN}• File:{RESET} {YELLOW}{}{RESET}", info.path);
    println!("{CYAN}• Size:{RESET} {size_kb:.1} KB");
    println!("{CYAN}• SQLite:{RESET} {}", info.sqlite_version);
    println!(
        "{CYAN}• Companies:{RESET} {GREEN}{}{RESET} ({} active)",
        info.companies, info.active_companies
    );
    println!("{CYAN}• Timer records:{RESET} {GREEN}{}{RESET}", info.timers);
    println!(
        "{CYAN}• Tracked time:{RESET} {}",
        crate::utils::format_worked(info.tracked_secs.max(0) as u64)
    );
    println!("{CYAN}• Date range:{RESET}");
    println!(
        "    from: {}",
        info.first_start.map(epoch_to_string).unwrap_or_else(dash)
    );
    println!(
        "    to:   {}",
        info.last_start.map(epoch_to_string).unwrap_or_else(dash)
    );
    println!();
}

/// `PRAGMA integrity_check`; `"ok"` when the file is sound.
pub fn integrity_check(db: &Database) -> AppResult<Vec<String>> {
    let rows = db.select("PRAGMA integrity_check", &[])?;
    let mut out = Vec::with_capacity(rows.len());
    for r in &rows {
        out.push(r.get_text("integrity_check")?.to_string());
    }
    Ok(out)
}

pub fn vacuum(db: &Database) -> AppResult<()> {
    Ok(db.exec("VACUUM")?)
}
