//! Store facade over `AppState` and a `SlotStorage` backend.
//!
//! # Invariants
//! - Hydration reads the slot exactly once, in `open`.
//! - Every `Outcome::NotesChanged` is followed by one full slot overwrite.
//! - Subscribers are notified once per effective change, never on no-ops.
//!
//! Rewriting the whole collection on each change is deliberate: collections
//! are small and a single overwrite keeps the slot trivially consistent.

use super::codec::{decode_notes, encode_notes};
use super::state::{reduce, AppState, Intent, IntentKind, Outcome, Phase};
use super::StoreResult;
use crate::model::note::{Note, NoteId};
use crate::storage::SlotStorage;
use log::{debug, error, info};

/// Fixed slot key holding the serialized collection.
pub const NOTES_SLOT_KEY: &str = "notes";

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Change notification delivered to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreEvent {
    pub intent: IntentKind,
    pub outcome: Outcome,
}

type Listener = Box<dyn FnMut(&StoreEvent, &AppState) + Send>;

/// Single writer of the note slot.
pub struct NoteStore<S: SlotStorage> {
    storage: S,
    key: String,
    state: AppState,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl<S: SlotStorage> NoteStore<S> {
    /// Hydrates a store from the default `notes` slot.
    pub fn open(storage: S) -> StoreResult<Self> {
        Self::open_with_key(storage, NOTES_SLOT_KEY)
    }

    /// Hydrates a store from the given slot key.
    ///
    /// # Errors
    /// - Returns `StoreError::Storage` when the slot cannot be read.
    ///   Absent or malformed values are not errors.
    pub fn open_with_key(storage: S, key: impl Into<String>) -> StoreResult<Self> {
        let key = key.into();
        let raw = storage.read_slot(&key)?;
        let notes = decode_notes(raw.as_deref());
        info!(
            "event=store_hydrate module=store status=ok note_count={} slot_present={}",
            notes.len(),
            raw.is_some()
        );

        Ok(Self {
            storage,
            key,
            state: AppState::hydrated(notes),
            listeners: Vec::new(),
            next_subscription: 0,
        })
    }

    /// Applies one intent, notifies subscribers, then persists if needed.
    ///
    /// # Errors
    /// - Returns `StoreError` when the slot overwrite fails. The in-memory
    ///   state keeps the mutation; there is no retry.
    pub fn dispatch(&mut self, intent: Intent) -> StoreResult<Outcome> {
        let kind = intent.kind();
        let outcome = reduce(&mut self.state, intent);
        if !outcome.is_change() {
            debug!(
                "event={} module=store status=noop note_count={}",
                kind.as_str(),
                self.state.notes().len()
            );
            return Ok(outcome);
        }

        self.publish(StoreEvent {
            intent: kind,
            outcome,
        });

        if outcome == Outcome::NotesChanged {
            if let Err(err) = self.persist() {
                error!(
                    "event={} module=store status=error error_code=persist_failed error={}",
                    kind.as_str(),
                    err
                );
                return Err(err);
            }
        }

        debug!(
            "event={} module=store status=ok note_count={}",
            kind.as_str(),
            self.state.notes().len()
        );
        Ok(outcome)
    }

    /// Creates a placeholder note at the front and selects it.
    pub fn create_note(&mut self) -> StoreResult<NoteId> {
        self.dispatch(Intent::Create)?;
        // Create always selects the new note.
        Ok(self.state.notes()[0].id.clone())
    }

    /// Makes `note_id` the current note. Unknown ids are ignored.
    pub fn select_note(&mut self, note_id: &NoteId) -> StoreResult<Outcome> {
        self.dispatch(Intent::Select(note_id.clone()))
    }

    /// Replaces the current note body and moves it to the front.
    pub fn update_note(&mut self, text: impl Into<String>) -> StoreResult<Outcome> {
        self.dispatch(Intent::Update(text.into()))
    }

    /// Removes `note_id`. Deleting a missing id is a no-op.
    pub fn delete_note(&mut self, note_id: &NoteId) -> StoreResult<Outcome> {
        self.dispatch(Intent::Delete(note_id.clone()))
    }

    pub fn find_current_note(&self) -> Option<&Note> {
        self.state.find_current_note()
    }

    pub fn notes(&self) -> &[Note] {
        self.state.notes()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn slot_key(&self) -> &str {
        &self.key
    }

    /// Registers a listener called after every effective state change.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&StoreEvent, &AppState) + Send + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` when `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(current, _)| *current != id);
        self.listeners.len() != before
    }

    fn publish(&mut self, event: StoreEvent) {
        for (_, listener) in &mut self.listeners {
            listener(&event, &self.state);
        }
    }

    fn persist(&mut self) -> StoreResult<()> {
        let raw = encode_notes(self.state.notes())?;
        self.storage.write_slot(&self.key, &raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{NoteStore, StoreEvent, NOTES_SLOT_KEY};
    use crate::model::note::{Note, PLACEHOLDER_BODY};
    use crate::store::codec::decode_notes;
    use crate::store::state::{IntentKind, Outcome};
    use crate::store::StoreError;
    use crate::storage::{MemorySlotStorage, SlotError, SlotResult, SlotStorage};
    use std::sync::{Arc, Mutex};

    fn persisted(store: &NoteStore<MemorySlotStorage>) -> Vec<Note> {
        let raw = store.storage().read_slot(NOTES_SLOT_KEY).unwrap();
        decode_notes(raw.as_deref())
    }

    #[test]
    fn hydration_selects_first_stored_note() {
        let storage = MemorySlotStorage::new().with_slot(
            NOTES_SLOT_KEY,
            r#"[{"id":"a","body":"first"},{"id":"b","body":"second"}]"#,
        );
        let store = NoteStore::open(storage).unwrap();
        assert_eq!(store.notes().len(), 2);
        assert_eq!(store.find_current_note().map(|n| n.body.as_str()), Some("first"));
        assert_eq!(store.storage().write_count(), 0);
    }

    #[test]
    fn every_collection_change_overwrites_slot() {
        let mut store = NoteStore::open(MemorySlotStorage::new()).unwrap();
        let id = store.create_note().unwrap();
        assert_eq!(persisted(&store), vec![Note::with_id(id.clone(), PLACEHOLDER_BODY)]);

        store.update_note("# Hello").unwrap();
        assert_eq!(persisted(&store), vec![Note::with_id(id.clone(), "# Hello")]);

        store.delete_note(&id).unwrap();
        assert!(persisted(&store).is_empty());
        assert_eq!(store.storage().write_count(), 3);
    }

    #[test]
    fn selection_and_noops_do_not_write() {
        let mut store = NoteStore::open(MemorySlotStorage::new()).unwrap();
        let first = store.create_note().unwrap();
        store.create_note().unwrap();
        assert_eq!(store.storage().write_count(), 2);

        assert_eq!(store.select_note(&first).unwrap(), Outcome::SelectionChanged);
        assert_eq!(
            store.delete_note(&"missing".into()).unwrap(),
            Outcome::Unchanged
        );
        assert_eq!(store.storage().write_count(), 2);
    }

    #[test]
    fn subscribers_see_each_effective_change_once() {
        let mut store = NoteStore::open(MemorySlotStorage::new()).unwrap();
        let seen: Arc<Mutex<Vec<(StoreEvent, usize)>>> = Arc::default();
        let sink = Arc::clone(&seen);
        let subscription = store.subscribe(move |event, state| {
            sink.lock().unwrap().push((*event, state.notes().len()));
        });

        let id = store.create_note().unwrap();
        store.delete_note(&id).unwrap();
        store.delete_note(&id).unwrap();

        let events = seen.lock().unwrap().clone();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].0.intent, IntentKind::Create);
        assert_eq!(events[0].1, 1);
        assert_eq!(events[1].0.intent, IntentKind::Delete);
        assert_eq!(events[1].1, 0);

        assert!(store.unsubscribe(subscription));
        assert!(!store.unsubscribe(subscription));
        store.create_note().unwrap();
        assert_eq!(seen.lock().unwrap().len(), 2);
    }

    struct ReadOnlySlot;

    impl SlotStorage for ReadOnlySlot {
        fn read_slot(&self, _key: &str) -> SlotResult<Option<String>> {
            Ok(None)
        }

        fn write_slot(&mut self, _key: &str, _value: &str) -> SlotResult<()> {
            Err(SlotError::MissingRequiredTable("slots"))
        }
    }

    #[test]
    fn write_failure_surfaces_error_and_keeps_state() {
        let mut store = NoteStore::open(ReadOnlySlot).unwrap();
        let err = store.create_note().unwrap_err();
        assert!(matches!(err, StoreError::Storage(_)));
        assert_eq!(store.notes().len(), 1);
    }
}
