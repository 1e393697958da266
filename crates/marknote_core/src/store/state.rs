//! Application state and the reducer that mutates it.
//!
//! # Responsibility
//! - Hold the ordered note collection and the current selection.
//! - Apply intents through `reduce`, the only mutation path.
//!
//! # Invariants
//! - Note ids are unique within `notes`.
//! - `current_note_id` is `None` or the id of a member of `notes`.
//! - Created and edited notes move to index 0; deletion keeps relative order.

use crate::model::note::{Note, NoteId};

/// Request emitted by a view and consumed by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Prepend a placeholder note and select it.
    Create,
    /// Make the given note current.
    Select(NoteId),
    /// Replace the body of the current note.
    Update(String),
    /// Remove the given note.
    Delete(NoteId),
}

impl Intent {
    pub fn kind(&self) -> IntentKind {
        match self {
            Self::Create => IntentKind::Create,
            Self::Select(_) => IntentKind::Select,
            Self::Update(_) => IntentKind::Update,
            Self::Delete(_) => IntentKind::Delete,
        }
    }
}

/// Payload-free intent label, used in events and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentKind {
    Create,
    Select,
    Update,
    Delete,
}

impl IntentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "note_create",
            Self::Select => "note_select",
            Self::Update => "note_update",
            Self::Delete => "note_delete",
        }
    }
}

/// What a reduced intent changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Intent referenced nothing applicable; state untouched.
    Unchanged,
    /// Only the selection moved. Nothing to persist.
    SelectionChanged,
    /// The collection changed and must be persisted.
    NotesChanged,
}

impl Outcome {
    pub fn is_change(self) -> bool {
        self != Self::Unchanged
    }
}

/// Collection-level lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Empty,
    NonEmpty,
}

/// Authoritative note list plus selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    notes: Vec<Note>,
    current_note_id: Option<NoteId>,
}

impl AppState {
    /// Builds the startup state: selection starts on the first note.
    pub fn hydrated(notes: Vec<Note>) -> Self {
        let current_note_id = notes.first().map(|note| note.id.clone());
        Self {
            notes,
            current_note_id,
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn current_note_id(&self) -> Option<&NoteId> {
        self.current_note_id.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn phase(&self) -> Phase {
        if self.notes.is_empty() {
            Phase::Empty
        } else {
            Phase::NonEmpty
        }
    }

    pub fn contains(&self, note_id: &NoteId) -> bool {
        self.position(note_id).is_some()
    }

    /// Returns the selected note, falling back to the first note.
    ///
    /// `None` only when the collection is empty.
    pub fn find_current_note(&self) -> Option<&Note> {
        self.current_note_id
            .as_ref()
            .and_then(|id| self.notes.iter().find(|note| &note.id == id))
            .or_else(|| self.notes.first())
    }

    fn position(&self, note_id: &NoteId) -> Option<usize> {
        self.notes.iter().position(|note| &note.id == note_id)
    }
}

/// Applies one intent to `state`.
///
/// Intents that reference a missing note (or an update with nothing
/// selected) are no-ops and return `Outcome::Unchanged`.
pub fn reduce(state: &mut AppState, intent: Intent) -> Outcome {
    match intent {
        Intent::Create => {
            let note = Note::new();
            state.current_note_id = Some(note.id.clone());
            state.notes.insert(0, note);
            Outcome::NotesChanged
        }
        Intent::Select(note_id) => {
            if state.current_note_id.as_ref() == Some(&note_id) || !state.contains(&note_id) {
                return Outcome::Unchanged;
            }
            state.current_note_id = Some(note_id);
            Outcome::SelectionChanged
        }
        Intent::Update(text) => {
            let Some(index) = state
                .current_note_id
                .as_ref()
                .and_then(|id| state.position(id))
            else {
                return Outcome::Unchanged;
            };
            let mut note = state.notes.remove(index);
            note.body = text;
            state.notes.insert(0, note);
            Outcome::NotesChanged
        }
        Intent::Delete(note_id) => {
            let Some(index) = state.position(&note_id) else {
                return Outcome::Unchanged;
            };
            state.notes.remove(index);
            if state.current_note_id.as_ref() == Some(&note_id) {
                state.current_note_id = state.notes.first().map(|note| note.id.clone());
            }
            Outcome::NotesChanged
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{reduce, AppState, Intent, Outcome, Phase};
    use crate::model::note::{Note, NoteId, PLACEHOLDER_BODY};

    fn state_of(ids: &[&str], selected: &str) -> AppState {
        let notes = ids
            .iter()
            .map(|id| Note::with_id(*id, format!("body {id}")))
            .collect();
        let mut state = AppState::hydrated(notes);
        reduce(&mut state, Intent::Select(NoteId::from(selected)));
        state
    }

    fn ids(state: &AppState) -> Vec<&str> {
        state.notes().iter().map(|note| note.id.as_str()).collect()
    }

    #[test]
    fn create_on_empty_selects_the_only_note() {
        let mut state = AppState::default();
        assert_eq!(state.phase(), Phase::Empty);

        assert_eq!(reduce(&mut state, Intent::Create), Outcome::NotesChanged);
        assert_eq!(state.phase(), Phase::NonEmpty);
        assert_eq!(state.notes().len(), 1);
        assert_eq!(state.current_note_id(), Some(&state.notes()[0].id));
        assert_eq!(state.notes()[0].body, PLACEHOLDER_BODY);
    }

    #[test]
    fn create_prepends_to_existing_notes() {
        let mut state = state_of(&["a", "b"], "b");
        reduce(&mut state, Intent::Create);
        let order = ids(&state);
        assert_eq!(&order[1..], &["a", "b"]);
        assert_eq!(state.current_note_id().map(NoteId::as_str), Some(order[0]));
    }

    #[test]
    fn update_moves_selected_note_to_front() {
        let mut state = AppState::hydrated(vec![Note::with_id("a", "x"), Note::with_id("b", "y")]);
        reduce(&mut state, Intent::Select(NoteId::from("b")));

        assert_eq!(
            reduce(&mut state, Intent::Update("z".to_string())),
            Outcome::NotesChanged
        );
        assert_eq!(
            state.notes(),
            &[Note::with_id("b", "z"), Note::with_id("a", "x")]
        );
        assert_eq!(state.current_note_id(), Some(&NoteId::from("b")));
    }

    #[test]
    fn update_without_selection_is_noop() {
        let mut state = AppState::default();
        assert_eq!(
            reduce(&mut state, Intent::Update("text".to_string())),
            Outcome::Unchanged
        );
        assert!(state.is_empty());
    }

    #[test]
    fn delete_keeps_relative_order_and_is_idempotent() {
        let mut state = state_of(&["a", "b", "c"], "a");
        assert_eq!(
            reduce(&mut state, Intent::Delete(NoteId::from("b"))),
            Outcome::NotesChanged
        );
        let after_first = state.clone();
        assert_eq!(ids(&state), vec!["a", "c"]);

        assert_eq!(
            reduce(&mut state, Intent::Delete(NoteId::from("b"))),
            Outcome::Unchanged
        );
        assert_eq!(state, after_first);
    }

    #[test]
    fn deleting_selected_note_falls_back_to_first() {
        let mut state = state_of(&["a", "b", "c"], "b");
        reduce(&mut state, Intent::Delete(NoteId::from("b")));
        assert_eq!(state.find_current_note().map(|n| n.id.as_str()), Some("a"));
        assert_eq!(state.current_note_id(), Some(&NoteId::from("a")));

        let mut single = state_of(&["only"], "only");
        reduce(&mut single, Intent::Delete(NoteId::from("only")));
        assert_eq!(single.find_current_note(), None);
        assert_eq!(single.current_note_id(), None);
        assert_eq!(single.phase(), Phase::Empty);
    }

    #[test]
    fn select_ignores_unknown_and_current_ids() {
        let mut state = state_of(&["a", "b"], "a");
        assert_eq!(
            reduce(&mut state, Intent::Select(NoteId::from("missing"))),
            Outcome::Unchanged
        );
        assert_eq!(
            reduce(&mut state, Intent::Select(NoteId::from("a"))),
            Outcome::Unchanged
        );
        assert_eq!(
            reduce(&mut state, Intent::Select(NoteId::from("b"))),
            Outcome::SelectionChanged
        );
        assert_eq!(state.find_current_note().map(|n| n.id.as_str()), Some("b"));
    }
}
