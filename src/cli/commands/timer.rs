use crate::cli::parser::TimerAction;
use crate::config::Config;
use crate::db::initialize::open_db;
use crate::errors::{AppError, AppResult};
use crate::models::{Company, Timer};
use crate::ui::messages::{ask_confirmation, info, success};
use crate::utils::format_worked;
use std::io;

pub fn handle(action: &TimerAction, cfg: &Config) -> AppResult<()> {
    match action {
        TimerAction::Del { id } => {
            let db = open_db(&cfg.database)?;
            let timer = Timer::find(&db, *id)?.ok_or(AppError::TimerNotFound(*id))?;
            let company = Company::find(&db, timer.company_id)?
                .map(|c| c.name)
                .unwrap_or_default();

            let prompt = format!(
                "Delete timer #{} ({company}, {} from {})? This action is irreversible.",
                timer.id,
                format_worked(timer.duration_secs()),
                timer.start_string()
            );
            if !ask_confirmation(&prompt, &mut io::stdin().lock()) {
                info("Operation cancelled.");
                return Ok(());
            }

            timer.remove(&db)?;
            success(format!("Timer #{} has been deleted.", timer.id));
        }
    }
    Ok(())
}
