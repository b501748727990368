use crate::config::Config;
use crate::errors::{AppError, AppResult};
use std::path::Path;
use std::process::Command;
use tracing::warn;

pub struct ConfigLogic;

impl ConfigLogic {
    pub fn print(cfg: &Config) -> AppResult<String> {
        Ok(serde_yaml::to_string(cfg)?)
    }

    /// `--editor` first, then `$EDITOR` / `$VISUAL`, then the platform default.
    pub fn editor(requested: Option<&str>) -> String {
        requested
            .map(str::to_string)
            .or_else(|| std::env::var("EDITOR").ok())
            .or_else(|| std::env::var("VISUAL").ok())
            .unwrap_or_else(|| Self::default_editor().to_string())
    }

    fn default_editor() -> &'static str {
        if cfg!(target_os = "windows") {
            "notepad"
        } else {
            "nano"
        }
    }

    /// Open `path` in an editor, falling back to the platform default when
    /// the chosen one fails. The file is written first when missing.
    pub fn edit(path: &Path, cfg: &Config, requested: Option<&str>) -> AppResult<String> {
        if !path.exists() {
            cfg.save_to(path)?;
        }

        let editor = Self::editor(requested);
        match Command::new(&editor).arg(path).status() {
            Ok(s) if s.success() => return Ok(editor),
            Ok(s) => warn!(editor, status = ?s.code(), "editor exited with failure"),
            Err(e) => warn!(editor, "cannot launch editor: {e}"),
        }

        let fallback = Self::default_editor();
        if fallback == editor {
            return Err(AppError::Config(format!("editor '{editor}' failed")));
        }
        match Command::new(fallback).arg(path).status() {
            Ok(s) if s.success() => Ok(fallback.to_string()),
            _ => Err(AppError::Config(format!(
                "neither '{editor}' nor '{fallback}' could edit the configuration"
            ))),
        }
    }
}
