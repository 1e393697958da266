//! Note store: state, reducer, persistence and change notification.
//!
//! # Responsibility
//! - Own the authoritative note collection and selection.
//! - Persist the full collection to one slot after every collection change.
//! - Publish change events to subscribed views.
//!
//! # Invariants
//! - Views never mutate state; they emit `Intent`s into `NoteStore::dispatch`.
//! - Selection-only changes re-render but are not persisted.

pub mod codec;
pub mod note_store;
pub mod state;

use crate::storage::SlotError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use note_store::{NoteStore, StoreEvent, SubscriptionId, NOTES_SLOT_KEY};
pub use state::{reduce, AppState, Intent, IntentKind, Outcome, Phase};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level failure. Persistence errors are surfaced, never retried.
#[derive(Debug)]
pub enum StoreError {
    /// Slot read/write failed.
    Storage(SlotError),
    /// Collection could not be serialized.
    Encode(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "note storage failed: {err}"),
            Self::Encode(err) => write!(f, "note encoding failed: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<SlotError> for StoreError {
    fn from(value: SlotError) -> Self {
        Self::Storage(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}
