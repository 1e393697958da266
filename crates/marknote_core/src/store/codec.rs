//! JSON codec for the persisted note slot.
//!
//! # Invariants
//! - Encoding writes the full collection as `[{"id":..,"body":..}, ..]`.
//! - Decoding never fails: absent, `null` or malformed data yields no notes.
//! - Decoded collections never contain duplicate ids.

use crate::model::note::Note;
use log::warn;
use std::collections::HashSet;

/// Serializes the whole collection for a slot overwrite.
pub fn encode_notes(notes: &[Note]) -> Result<String, serde_json::Error> {
    serde_json::to_string(notes)
}

/// Deserializes a raw slot value into a note collection.
///
/// Duplicate ids keep their first occurrence.
pub fn decode_notes(raw: Option<&str>) -> Vec<Note> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    let parsed = match serde_json::from_str::<Option<Vec<Note>>>(raw) {
        Ok(parsed) => parsed.unwrap_or_default(),
        Err(err) => {
            warn!(
                "event=notes_decode module=store status=error error_code=malformed_slot raw_len={} error={}",
                raw.len(),
                err
            );
            return Vec::new();
        }
    };

    let total = parsed.len();
    let mut seen = HashSet::with_capacity(total);
    let notes: Vec<Note> = parsed
        .into_iter()
        .filter(|note| seen.insert(note.id.clone()))
        .collect();
    if notes.len() != total {
        warn!(
            "event=notes_decode module=store status=ok dropped_duplicates={}",
            total - notes.len()
        );
    }
    notes
}
