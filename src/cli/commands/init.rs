use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::open_db;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use tracing::info as log_info;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the SQLite database with its schema, unless it already exists
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let db_path = cfg.database.clone();

    info("Initializing timelancer…");
    if !cli.test {
        let path = Config::config_file();
        cfg.save_to(&path)?;
        println!("📄 Config file : {}", path.display());
    }
    println!("🗄️  Database   : {db_path}");

    let db = open_db(&db_path)?;
    db.close()?;
    log_info!(path = %db_path, "initialized");

    success(format!("Database ready at {db_path}"));
    Ok(())
}
