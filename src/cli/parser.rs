use crate::core::export::ExportFormat;
use crate::utils::date::Period;
use clap::{Parser, Subcommand};

/// Command-line interface definition for timelancer
/// Track the time you work for your companies, with alarms, in SQLite
#[derive(Parser)]
#[command(
    name = "timelancer",
    version = env!("CARGO_PKG_VERSION"),
    about = "A freelancer's work timer: track sessions per company, set alarms, review statistics",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            requires = "edit_config",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Inspect or maintain the database
    Db {
        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Manage companies
    Company {
        #[command(subcommand)]
        action: CompanyAction,
    },

    /// Start a work session for a company
    Work {
        /// Company id or shortcut
        #[arg(long, short)]
        company: String,

        #[arg(
            long = "alarm-after",
            value_name = "DURATION",
            help = "Ring after HH:MM:SS, MM:SS or seconds"
        )]
        alarm_after: Option<String>,

        #[arg(long = "alarm-at", value_name = "TIME", help = "Ring at HH:MM[:SS] today")]
        alarm_at: Option<String>,
    },

    /// Run a standalone alarm
    Alarm {
        #[command(subcommand)]
        action: AlarmAction,
    },

    /// Show the working time statistic
    Stats {
        /// Company id or shortcut
        #[arg(long, short)]
        company: Option<String>,

        #[arg(long, short, value_enum, default_value_t = Period::All)]
        period: Period,
    },

    /// Export the working time statistic to CSV or JSON
    Export {
        #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        /// Company id or shortcut
        #[arg(long, short)]
        company: Option<String>,

        #[arg(long, short, value_enum, default_value_t = Period::All)]
        period: Period,

        #[arg(long, help = "Overwrite an existing file without asking")]
        force: bool,
    },

    /// Manage saved timer records
    Timer {
        #[command(subcommand)]
        action: TimerAction,
    },
}

#[derive(Subcommand)]
pub enum CompanyAction {
    /// Add a new company
    Add {
        shortcut: String,
        name: String,
    },

    /// Change shortcut and/or name
    Edit {
        /// Company id or shortcut
        company: String,

        #[arg(long)]
        shortcut: Option<String>,

        #[arg(long)]
        name: Option<String>,
    },

    /// List active companies
    List {
        #[arg(long, help = "Include inactive companies")]
        all: bool,
    },

    /// Activate or deactivate a company
    Toggle {
        /// Company id or shortcut
        company: String,
    },

    /// Delete a company without timer records
    Del {
        /// Company id or shortcut
        company: String,
    },
}

#[derive(Subcommand)]
pub enum AlarmAction {
    /// Ring after a duration
    After {
        /// HH:MM:SS, MM:SS or seconds
        duration: String,
    },

    /// Ring at a time of day
    At {
        /// HH:MM or HH:MM:SS
        time: String,
    },
}

#[derive(Subcommand)]
pub enum TimerAction {
    /// Delete a timer record by id
    Del { id: i64 },
}
