//! Shell configuration loaded from TOML, overridden by CLI flags.

use crate::cli::Cli;
use derive_getters::Getters;
use derive_more::{Display, Error};
use perfect_tictactoe::GameMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Settings for the terminal shell.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct TuiConfig {
    /// Mode to start in; `None` shows the menu.
    #[serde(default)]
    mode: Option<GameMode>,

    /// Pause before the AI plays, so its move is visible as a separate step.
    #[serde(default = "default_ai_delay_ms")]
    ai_delay_ms: u64,

    /// Log destination.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,

    /// Whether the 'h' key shows the search's suggestion.
    #[serde(default = "default_show_hints")]
    show_hints: bool,
}

fn default_ai_delay_ms() -> u64 {
    500
}

fn default_log_file() -> PathBuf {
    PathBuf::from("perfect_tictactoe.log")
}

fn default_show_hints() -> bool {
    true
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            mode: None,
            ai_delay_ms: default_ai_delay_ms(),
            log_file: default_log_file(),
            show_hints: default_show_hints(),
        }
    }
}

impl TuiConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(?config, "Config loaded successfully");
        Ok(config)
    }

    /// Loads the file if it exists, otherwise falls back to defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies command-line overrides on top of file values.
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(mode) = cli.mode {
            self.mode = Some(mode);
        }
        if let Some(delay) = cli.ai_delay_ms {
            self.ai_delay_ms = delay;
        }
        if let Some(path) = &cli.log_file {
            self.log_file = path.clone();
        }
        if cli.no_hints {
            self.show_hints = false;
        }
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
