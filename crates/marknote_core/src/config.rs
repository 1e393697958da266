//! Environment-driven runtime configuration.
//!
//! # Responsibility
//! - Resolve database path and logging settings for FFI/CLI entry points.
//!
//! # Invariants
//! - Blank environment values behave as unset.
//! - Resolution never fails; invalid logging settings surface at init time.

use crate::logging::default_log_level;
use crate::store::NOTES_SLOT_KEY;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "MARKNOTE_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "MARKNOTE_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "MARKNOTE_LOG_DIR";
const DEFAULT_DB_FILE_NAME: &str = "marknote.sqlite3";

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub storage_key: &'static str,
    pub log_level: String,
    /// Logging stays disabled when unset.
    pub log_dir: Option<String>,
}

impl AppConfig {
    /// Reads configuration from process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            db_path: read(DB_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)),
            storage_key: NOTES_SLOT_KEY,
            log_level: read(LOG_LEVEL_ENV).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: read(LOG_DIR_ENV),
        }
    }
}
