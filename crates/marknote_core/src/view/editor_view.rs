//! Editor pane for the current note.

use crate::model::note::{Note, NoteId};
use crate::store::Intent;

/// Rendered editor pane; absent when there is no current note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorView {
    pub note_id: NoteId,
    pub text: String,
}

impl EditorView {
    pub fn render(current: Option<&Note>) -> Option<Self> {
        current.map(|note| Self {
            note_id: note.id.clone(),
            text: note.body.clone(),
        })
    }

    /// Every content change is forwarded immediately, without debouncing.
    pub fn on_change(text: impl Into<String>) -> Intent {
        Intent::Update(text.into())
    }
}

#[cfg(test)]
mod tests {
    use super::EditorView;
    use crate::model::note::Note;
    use crate::store::Intent;

    #[test]
    fn renders_current_body_or_nothing() {
        let note = Note::with_id("a", "# Hello");
        let view = EditorView::render(Some(&note)).unwrap();
        assert_eq!(view.text, "# Hello");
        assert_eq!(view.note_id.as_str(), "a");
        assert_eq!(EditorView::render(None), None);
    }

    #[test]
    fn change_emits_update() {
        assert_eq!(EditorView::on_change("x"), Intent::Update("x".to_string()));
    }
}
