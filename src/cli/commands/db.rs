use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::initialize::open_db;
use crate::db::stats;
use crate::errors::AppResult;
use crate::ui::messages::warning;
use crate::utils::colors::{CYAN, GREEN, RED, RESET};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        check,
        vacuum,
        info,
    } = cmd
    {
        if !(*check || *vacuum || *info) {
            warning("Nothing to do: use --info, --check or --vacuum");
            return Ok(());
        }

        let db = open_db(&cfg.database)?;

        if *info {
            stats::print_db_info(&stats::collect_info(&db)?);
        }

        if *check {
            println!("{CYAN}▶ Running integrity check…{RESET}");
            let report = stats::integrity_check(&db)?;
            if report.len() == 1 && report[0] == "ok" {
                println!("{GREEN}✔ Integrity check passed.{RESET}\n");
            } else {
                println!("{RED}✘ Integrity check failed:{RESET}");
                for line in report {
                    println!("    {line}");
                }
                println!();
            }
        }

        if *vacuum {
            println!("{CYAN}▶ Running VACUUM…{RESET}");
            stats::vacuum(&db)?;
            println!("{GREEN}✔ Vacuum completed.{RESET}\n");
        }
    }

    Ok(())
}
