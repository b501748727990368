use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::session::{self, Alarm, Inputs};
use crate::db::initialize::open_db;
use crate::errors::AppResult;
use crate::models::Company;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Work {
        company,
        alarm_after,
        alarm_at,
    } = cmd
    {
        // Bad alarm values are rejected before the database is opened.
        let mut alarms = Vec::new();
        if let Some(d) = alarm_after {
            alarms.push(Alarm::after(d)?);
        }
        if let Some(t) = alarm_at {
            alarms.push(Alarm::at(t)?);
        }

        let db = open_db(&cfg.database)?;
        let company = Company::lookup(&db, company)?;
        let inputs = Inputs::terminal()?;
        session::run_work(&db, cfg, &company, &alarms, &inputs)?;
    }
    Ok(())
}
