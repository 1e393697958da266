//! Note record and identity.
//!
//! # Invariants
//! - `id` is assigned once at creation and is never reused or mutated.
//! - The first line of `body` is the note title/snippet.
//!
//! Wire shape is `{"id": string, "body": string}`.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Body given to freshly created notes.
pub const PLACEHOLDER_BODY: &str = "# Type your markdown note's title here";

/// Opaque stable note identifier.
///
/// New ids are UUID v4 strings; ids loaded from storage are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Generates a fresh collision-free id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for NoteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for NoteId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// One markdown note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    /// Raw markdown source.
    pub body: String,
}

impl Note {
    /// Creates a note with a generated id and the placeholder body.
    pub fn new() -> Self {
        Self::with_id(NoteId::generate(), PLACEHOLDER_BODY)
    }

    /// Creates a note with a caller-provided id, e.g. when importing.
    pub fn with_id(id: impl Into<NoteId>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            body: body.into(),
        }
    }

    /// First line of the body, without the line terminator.
    pub fn snippet(&self) -> &str {
        self.body
            .split('\n')
            .next()
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .unwrap_or_default()
    }
}

impl Default for Note {
    fn default() -> Self {
        Self::new()
    }
}
