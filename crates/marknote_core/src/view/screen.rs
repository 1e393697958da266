//! Top-level screen: empty state or the two-pane workspace.
//!
//! # Invariants
//! - The empty state is shown if and only if the collection is empty.
//! - Split pane sizes are percentages that always sum to 100.

use super::editor_view::EditorView;
use super::list_view::ListView;
use crate::store::{AppState, Intent};

const DEFAULT_LIST_PERCENT: u8 = 20;
const MIN_PANE_PERCENT: u8 = 10;
const MAX_PANE_PERCENT: u8 = 90;

/// Horizontal split between list and editor panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitSizes {
    list_percent: u8,
}

impl SplitSizes {
    /// Moves the divider; the list pane is clamped to `[10, 90]` percent.
    pub fn resize(&mut self, list_percent: u8) {
        self.list_percent = list_percent.clamp(MIN_PANE_PERCENT, MAX_PANE_PERCENT);
    }

    pub fn list_percent(self) -> u8 {
        self.list_percent
    }

    pub fn editor_percent(self) -> u8 {
        100 - self.list_percent
    }
}

impl Default for SplitSizes {
    fn default() -> Self {
        Self {
            list_percent: DEFAULT_LIST_PERCENT,
        }
    }
}

/// Shown when there are no notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub heading: &'static str,
    pub action_label: &'static str,
}

impl EmptyState {
    /// The single "create one now" affordance.
    pub fn create_first_note() -> Intent {
        Intent::Create
    }
}

impl Default for EmptyState {
    fn default() -> Self {
        Self {
            heading: "You have no notes",
            action_label: "Create one now",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Empty(EmptyState),
    Workspace {
        list: ListView,
        editor: Option<EditorView>,
        split: SplitSizes,
    },
}

impl Screen {
    pub fn derive(state: &AppState, split: SplitSizes) -> Self {
        if state.is_empty() {
            return Self::Empty(EmptyState::default());
        }

        let current = state.find_current_note();
        Self::Workspace {
            list: ListView::render(state.notes(), current),
            editor: EditorView::render(current),
            split,
        }
    }

    pub fn is_empty_state(&self) -> bool {
        matches!(self, Self::Empty(_))
    }

    /// Plain-text rendering used by the CLI.
    pub fn to_text(&self) -> String {
        match self {
            Self::Empty(empty) => format!("{}\n[{}]\n", empty.heading, empty.action_label),
            Self::Workspace { list, editor, .. } => {
                let mut out = String::from("Notes [+]\n");
                for row in &list.rows {
                    let marker = if row.selected { '>' } else { ' ' };
                    out.push_str(&format!("{marker} {} [x]\n", row.snippet));
                }
                if let Some(editor) = editor {
                    out.push_str("---\n");
                    out.push_str(&editor.text);
                    out.push('\n');
                }
                out
            }
        }
    }
}
