//! Sidebar list of notes.
//!
//! # Invariants
//! - Rows follow collection order.
//! - Activating the delete control yields only `Delete`, never `Select`.

use crate::model::note::{Note, NoteId};
use crate::store::Intent;

/// One rendered sidebar row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRow {
    pub id: NoteId,
    /// First line of the note body.
    pub snippet: String,
    pub selected: bool,
}

/// Part of a row that received an activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowTarget {
    /// The clickable row itself.
    RowBody,
    /// The delete button nested inside the row.
    DeleteButton,
}

/// Rendered list pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub rows: Vec<NoteRow>,
}

impl ListView {
    pub fn render(notes: &[Note], current: Option<&Note>) -> Self {
        let current_id = current.map(|note| &note.id);
        let rows = notes
            .iter()
            .map(|note| NoteRow {
                id: note.id.clone(),
                snippet: note.snippet().to_string(),
                selected: Some(&note.id) == current_id,
            })
            .collect();
        Self { rows }
    }

    /// Header `+` control.
    pub fn new_note() -> Intent {
        Intent::Create
    }

    /// Maps an activation on a row to the single intent it emits.
    ///
    /// The delete button sits inside the row, so its activation is consumed
    /// there and does not also select the row.
    pub fn activate(note_id: &NoteId, target: RowTarget) -> Intent {
        match target {
            RowTarget::DeleteButton => Intent::Delete(note_id.clone()),
            RowTarget::RowBody => Intent::Select(note_id.clone()),
        }
    }

    pub fn selected_row(&self) -> Option<&NoteRow> {
        self.rows.iter().find(|row| row.selected)
    }
}
