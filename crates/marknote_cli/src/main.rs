//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `marknote_core` linkage and the configured note database.
//! - Print the current screen as plain text.

use log::error;
use marknote_core::logging::init_logging_from_config;
use marknote_core::{AppConfig, NoteStore, Screen, SplitSizes, SqliteSlotStorage};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("marknote_core ping={}", marknote_core::ping());
    println!("marknote_core version={}", marknote_core::core_version());

    let config = AppConfig::from_env();
    if let Err(err) = init_logging_from_config(&config) {
        eprintln!("logging disabled: {err}");
    }
    println!("db_path={}", config.db_path.display());

    let store = match SqliteSlotStorage::open(&config.db_path)
        .map_err(|err| err.to_string())
        .and_then(|storage| {
            NoteStore::open_with_key(storage, config.storage_key).map_err(|err| err.to_string())
        }) {
        Ok(store) => store,
        Err(err) => {
            error!("event=cli_open module=cli status=error error={err}");
            eprintln!("failed to open note store: {err}");
            return ExitCode::FAILURE;
        }
    };

    print!("{}", Screen::derive(store.state(), SplitSizes::default()).to_text());
    ExitCode::SUCCESS
}
