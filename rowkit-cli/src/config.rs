// SPDX-FileCopyrightText: 2026 rowkit contributors
// SPDX-License-Identifier: MIT

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rowkit_db::{DbConfig, JournalMode, OpenMode};

use crate::error::{CliError, IoContext};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "ROWKIT_CONFIG";

/// Config file picked up from the working directory when `ROWKIT_CONFIG` is unset.
pub const DEFAULT_CONFIG_FILE: &str = "rowkit.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    ReadOnly,
    ReadWrite,
    Create,
}

impl From<Mode> for OpenMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::ReadOnly => OpenMode::ReadOnly,
            Mode::ReadWrite => OpenMode::ReadWrite,
            Mode::Create => OpenMode::Create,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Path to the SQLite database file
    pub database: PathBuf,

    pub mode: Mode,

    /// Milliseconds to wait on a locked database
    pub busy_timeout_ms: u64,

    /// SQLite journal mode (DELETE, TRUNCATE, PERSIST, MEMORY, WAL, OFF)
    pub journal_mode: String,

    pub foreign_keys: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: PathBuf::from("rowkit.db"),
            mode: Mode::Create,
            busy_timeout_ms: 5000,
            journal_mode: "WAL".to_string(),
            foreign_keys: true,
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, CliError> {
        let contents = std::fs::read_to_string(path)
            .io_context(|| format!("Failed to read config file at {}", path.display()))?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load from `explicit`, else `rowkit.toml` if it exists, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, CliError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))
            }
            None => Ok(Self::default()),
        }
    }

    /// Load using the `ROWKIT_CONFIG` environment variable.
    pub fn load_from_env() -> Result<Self, CliError> {
        let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        Self::load(explicit.as_deref())
    }

    /// Check the settings and convert them for the database layer.
    pub fn to_db_config(&self) -> Result<DbConfig, CliError> {
        if self.database.as_os_str().is_empty() {
            return Err(CliError::config("database path must not be empty"));
        }
        let journal_mode = self
            .journal_mode
            .parse::<JournalMode>()
            .map_err(CliError::config)?;

        Ok(DbConfig {
            path: self.database.clone(),
            mode: self.mode.into(),
            busy_timeout: Duration::from_millis(self.busy_timeout_ms),
            journal_mode,
            foreign_keys: self.foreign_keys,
        })
    }
}
