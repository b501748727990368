use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::stats::{self, StatFilter};
use crate::db::initialize::open_db;
use crate::errors::AppResult;
use crate::models::Company;
use crate::sqlite::Database;
use crate::ui::messages::{header, info};
use crate::utils::date::{self, Period};

/// Resolve the optional company key into a filter.
pub(crate) fn build_filter(
    db: &Database,
    company: Option<&str>,
    period: Period,
) -> AppResult<(StatFilter, Option<Company>)> {
    let company = company.map(|key| Company::lookup(db, key)).transpose()?;
    let filter = StatFilter {
        company_id: company.as_ref().map(|c| c.id),
        period,
    };
    Ok((filter, company))
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Stats { company, period } = cmd {
        let db = open_db(&cfg.database)?;
        let (filter, company) = build_filter(&db, company.as_deref(), *period)?;

        let who = company.map(|c| c.name).unwrap_or_else(|| "all companies".to_string());
        header(format!("Working time: {who}, {period}"));

        let records = stats::load_records(&db, &filter, date::today())?;
        if records.is_empty() {
            info("No timer records for the selected period.");
            return Ok(());
        }
        println!("{}", stats::render(&records, cfg.separator()));
    }
    Ok(())
}
