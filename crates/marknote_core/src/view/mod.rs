//! Presentation models derived from store state.
//!
//! # Responsibility
//! - Turn `AppState` into render-ready rows, editor content and layout.
//! - Translate user activations into `Intent`s.
//!
//! # Invariants
//! - Views hold no note state and never touch storage.

pub mod editor_view;
pub mod list_view;
pub mod screen;

pub use editor_view::EditorView;
pub use list_view::{ListView, NoteRow, RowTarget};
pub use screen::{EmptyState, Screen, SplitSizes};
