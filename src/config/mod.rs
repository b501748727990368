use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = ".timelancer";
const CONFIG_FILE: &str = "timelancer.conf";
const DATABASE_FILE: &str = "timelancer.sqlite";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    /// Shorter work sessions are discarded instead of offered for saving.
    #[serde(default = "default_min_session_secs")]
    pub min_session_secs: u64,
    /// Used when RUST_LOG is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_min_session_secs() -> u64 {
    5
}
fn default_log_level() -> String {
    "warn".to_string()
}
fn default_separator_char() -> String {
    "-".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            min_session_secs: default_min_session_secs(),
            log_level: default_log_level(),
            separator_char: default_separator_char(),
        }
    }
}

impl Config {
    /// `~/.timelancer`
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join(CONFIG_FILE)
    }

    pub fn database_file() -> PathBuf {
        Self::config_dir().join(DATABASE_FILE)
    }

    /// Load the configuration file, or the defaults when there is none.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(&content)?)
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;
        Ok(())
    }

    /// First character of `separator_char`, used for table rules.
    pub fn separator(&self) -> char {
        self.separator_char.chars().next().unwrap_or('-')
    }

    /// Resolve the database path for `init`: absolute paths are kept,
    /// bare names land in the config directory.
    pub fn resolve_database(custom: Option<&str>) -> AppResult<PathBuf> {
        match custom {
            None => Ok(Self::database_file()),
            Some(name) if name.trim().is_empty() => {
                Err(AppError::Config("empty database path".into()))
            }
            Some(name) => {
                let p = crate::utils::path::expand_tilde(name);
                if p.is_absolute() || p.parent().is_some_and(|d| !d.as_os_str().is_empty()) {
                    Ok(p)
                } else {
                    Ok(Self::config_dir().join(p))
                }
            }
        }
    }
}
