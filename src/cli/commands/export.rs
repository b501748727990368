use crate::cli::commands::stats::build_filter;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::export::{self, ExportRequest};
use crate::db::initialize::open_db;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use crate::utils::date;
use std::io;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        company,
        period,
        force,
    } = cmd
    {
        let db = open_db(&cfg.database)?;
        let (filter, _) = build_filter(&db, company.as_deref(), *period)?;
        let req = ExportRequest {
            format: *format,
            file,
            filter,
            force: *force,
        };

        let (path, n) = export::export(&db, &req, date::today(), &mut io::stdin().lock())?;
        if n == 0 {
            warning("No timer records for the selected period. Nothing to export.");
        } else {
            success(format!("Exported {n} record(s) to {}", path.display()));
        }
    }
    Ok(())
}
