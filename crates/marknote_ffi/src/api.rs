//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose note intents (create/select/update/delete) to Dart via FRB.
//! - Return a full screen snapshot after every call so the UI re-renders
//!   from Rust-owned state only.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - One store session per process; calls are serialized by a mutex.

use log::{error, info};
use marknote_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    AppConfig, EditorView, ListView, NoteId, NoteStore, RowTarget, Screen, SplitSizes,
    SqliteSlotStorage, StoreResult,
};
use std::sync::{Mutex, MutexGuard};

static SESSION: Mutex<Option<Session>> = Mutex::new(None);

struct Session {
    store: NoteStore<SqliteSlotStorage>,
    split: SplitSizes,
}

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One sidebar row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRowItem {
    pub note_id: String,
    /// First line of the note body.
    pub snippet: String,
    pub selected: bool,
}

/// Render-ready snapshot of the whole screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenSnapshot {
    /// `true` when the empty state (no notes) must be shown.
    pub is_empty: bool,
    pub empty_heading: Option<String>,
    pub empty_action_label: Option<String>,
    pub rows: Vec<NoteRowItem>,
    pub editor_note_id: Option<String>,
    pub editor_text: Option<String>,
    pub list_percent: u8,
    pub editor_percent: u8,
}

/// Envelope returned by every note call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Note created by `notes_create`, if any.
    pub note_id: Option<String>,
    /// Human-readable message for diagnostics.
    pub message: String,
    /// Screen after the operation; `None` when the store could not be opened.
    pub screen: Option<ScreenSnapshot>,
}

/// Returns the current screen without mutating state.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_screen() -> NotesResponse {
    run("notes_screen", |_| Ok(None))
}

/// Header `+` / "Create one now" action.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_create() -> NotesResponse {
    run("notes_create", |session| {
        session
            .store
            .dispatch(ListView::new_note())
            .map(|_| session.store.find_current_note().map(|note| note.id.to_string()))
    })
}

/// Row activation. Unknown ids leave the selection unchanged.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_select(note_id: String) -> NotesResponse {
    let note_id = NoteId::from(note_id);
    run("notes_select", move |session| {
        session
            .store
            .dispatch(ListView::activate(&note_id, RowTarget::RowBody))
            .map(|_| None)
    })
}

/// Editor content change; forwarded on every keystroke.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_update(text: String) -> NotesResponse {
    run("notes_update", move |session| {
        session
            .store
            .dispatch(EditorView::on_change(text))
            .map(|_| None)
    })
}

/// Row delete button. Never selects the row it belongs to.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_delete(note_id: String) -> NotesResponse {
    let note_id = NoteId::from(note_id);
    run("notes_delete", move |session| {
        session
            .store
            .dispatch(ListView::activate(&note_id, RowTarget::DeleteButton))
            .map(|_| None)
    })
}

/// Split divider drag. Clamped to keep both panes visible.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_resize_split(list_percent: u8) -> NotesResponse {
    run("notes_resize_split", move |session| {
        session.split.resize(list_percent);
        Ok(None)
    })
}

fn run(
    operation: &'static str,
    f: impl FnOnce(&mut Session) -> StoreResult<Option<String>>,
) -> NotesResponse {
    let mut guard = lock_session();
    let mut session = match guard.take() {
        Some(session) => session,
        None => match open_session() {
            Ok(session) => session,
            Err(err) => {
                error!("event={operation} module=ffi status=error error_code=session_open_failed error={err}");
                return NotesResponse {
                    ok: false,
                    note_id: None,
                    message: format!("{operation} failed: {err}"),
                    screen: None,
                };
            }
        },
    };

    let result = f(&mut session);
    let screen = Some(snapshot(&session));
    *guard = Some(session);
    match result {
        Ok(note_id) => NotesResponse {
            ok: true,
            note_id,
            message: "ok".to_string(),
            screen,
        },
        Err(err) => NotesResponse {
            ok: false,
            note_id: None,
            message: format!("{operation} failed: {err}"),
            screen,
        },
    }
}

fn lock_session() -> MutexGuard<'static, Option<Session>> {
    // A panic inside a previous call must not brick the session.
    SESSION
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn open_session() -> Result<Session, String> {
    let config = AppConfig::from_env();
    let storage = SqliteSlotStorage::open(&config.db_path).map_err(|err| err.to_string())?;
    let store =
        NoteStore::open_with_key(storage, config.storage_key).map_err(|err| err.to_string())?;
    info!(
        "event=session_open module=ffi status=ok note_count={}",
        store.notes().len()
    );
    Ok(Session {
        store,
        split: SplitSizes::default(),
    })
}

fn snapshot(session: &Session) -> ScreenSnapshot {
    let split = session.split;
    let base = ScreenSnapshot {
        is_empty: false,
        empty_heading: None,
        empty_action_label: None,
        rows: Vec::new(),
        editor_note_id: None,
        editor_text: None,
        list_percent: split.list_percent(),
        editor_percent: split.editor_percent(),
    };

    match Screen::derive(session.store.state(), split) {
        Screen::Empty(empty) => ScreenSnapshot {
            is_empty: true,
            empty_heading: Some(empty.heading.to_string()),
            empty_action_label: Some(empty.action_label.to_string()),
            ..base
        },
        Screen::Workspace { list, editor, .. } => ScreenSnapshot {
            rows: list
                .rows
                .into_iter()
                .map(|row| NoteRowItem {
                    note_id: row.id.to_string(),
                    snippet: row.snippet,
                    selected: row.selected,
                })
                .collect(),
            editor_note_id: editor.as_ref().map(|view| view.note_id.to_string()),
            editor_text: editor.map(|view| view.text),
            ..base
        },
    }
}

#[cfg(test)]
fn install_in_memory_session() {
    let storage = SqliteSlotStorage::open_in_memory().expect("in-memory slot storage");
    let store = NoteStore::open(storage).expect("in-memory store");
    *lock_session() = Some(Session {
        store,
        split: SplitSizes::default(),
    });
}
