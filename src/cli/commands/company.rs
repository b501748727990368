use crate::cli::parser::CompanyAction;
use crate::config::Config;
use crate::core::company::CompanyLogic;
use crate::db::initialize::open_db;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{ask_confirmation, info, success};
use std::io;

pub fn handle(action: &CompanyAction, cfg: &Config) -> AppResult<()> {
    // Reject empty input before the database is touched.
    if let CompanyAction::Add { shortcut, name } = action {
        if shortcut.trim().is_empty() {
            return Err(AppError::EmptyValue("Shortcut"));
        }
        if name.trim().is_empty() {
            return Err(AppError::EmptyValue("Name"));
        }
    }

    let db = open_db(&cfg.database)?;

    match action {
        CompanyAction::Add { shortcut, name } => {
            let c = CompanyLogic::add(&db, shortcut, name)?;
            success(format!("Company {} added with id {}", CompanyLogic::label(&c), c.id));
        }

        CompanyAction::Edit {
            company,
            shortcut,
            name,
        } => {
            let c = CompanyLogic::edit(&db, company, shortcut.as_deref(), name.as_deref())?;
            success(format!("Company #{} is now {}", c.id, CompanyLogic::label(&c)));
        }

        CompanyAction::List { all } => {
            let companies = CompanyLogic::list(&db, *all)?;
            if companies.is_empty() {
                info("No companies yet. Add one with `timelancer company add <shortcut> <name>`");
            } else {
                println!("{}", CompanyLogic::render(&companies, cfg.separator()));
            }
        }

        CompanyAction::Toggle { company } => {
            let c = CompanyLogic::toggle(&db, company)?;
            let state = if c.used { "active" } else { "inactive" };
            success(format!("Company {} is now {state}", CompanyLogic::label(&c)));
        }

        CompanyAction::Del { company } => {
            let prompt = format!("Delete company '{company}'? This action is irreversible.");
            if !ask_confirmation(&prompt, &mut io::stdin().lock()) {
                info("Operation cancelled.");
                return Ok(());
            }
            let c = CompanyLogic::delete(&db, company)?;
            success(format!("Company {} ({}) has been deleted.", c.name, c.shortcut));
        }
    }

    Ok(())
}
