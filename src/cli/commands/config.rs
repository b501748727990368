use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::config::ConfigLogic;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    {
        if !*print_config && !*edit_config {
            warning("Nothing to do: use --print or --edit");
            return Ok(());
        }

        if *print_config {
            println!("📄 Current configuration:\n");
            println!("{}", ConfigLogic::print(cfg)?);
        }

        if *edit_config {
            let path = Config::config_file();
            let used = ConfigLogic::edit(&path, cfg, editor.as_deref())?;
            success(format!("Configuration file edited using '{used}'"));
        }
    }

    Ok(())
}
