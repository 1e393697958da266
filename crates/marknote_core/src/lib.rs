//! Core domain logic for MarkNote.
//! This crate is the single source of truth for note invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod storage;
pub mod store;
pub mod view;

pub use config::AppConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Note, NoteId, PLACEHOLDER_BODY};
pub use storage::{MemorySlotStorage, SlotError, SlotResult, SlotStorage, SqliteSlotStorage};
pub use store::{
    AppState, Intent, IntentKind, NoteStore, Outcome, Phase, StoreError, StoreEvent, StoreResult,
    SubscriptionId, NOTES_SLOT_KEY,
};
pub use view::{EditorView, EmptyState, ListView, NoteRow, RowTarget, Screen, SplitSizes};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
