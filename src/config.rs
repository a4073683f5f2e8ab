//! Runtime settings read from the environment.

use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".shlist";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "shlist.db";
/// Overrides the database location.
pub const DB_ENV: &str = "SHLIST_DB";
/// Default tracing filter when `RUST_LOG` is not set.
pub const LOG_ENV: &str = "SHLIST_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub log_filter: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any variable source. `from_env` passes the process
    /// environment; tests pass a closure.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = match lookup(DB_ENV).filter(|value| !value.trim().is_empty()) {
            Some(path) => PathBuf::from(path),
            None => default_db_path()?,
        };
        let log_filter = lookup(LOG_ENV)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            db_path,
            log_filter,
        })
    }
}

/// `~/.shlist/shlist.db`, used when `SHLIST_DB` is unset or blank.
fn default_db_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
}
