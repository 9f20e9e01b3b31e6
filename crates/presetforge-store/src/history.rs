//! Snapshot-based undo/redo history.
//!
//! Every entry is a deep copy of all three collections, never a single one,
//! so stepping through history can not leave collections out of sync.
//!
//! - Undo stack is bounded; pushing past the bound evicts the oldest entry
//! - Pushing a new entry clears the redo stack
//! - Undo/redo swap the caller's current state with the stored one

use std::collections::VecDeque;

use presetforge_common::{CollectionKind, COLLECTION_COUNT};
use tracing::debug;

use crate::document::PresetDocument;

/// Default maximum number of undo levels.
pub const MAX_UNDO_LEVELS: usize = 50;

/// Deep copy of every collection at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreState {
    documents: [PresetDocument; COLLECTION_COUNT],
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            documents: CollectionKind::ALL.map(PresetDocument::new),
        }
    }
}

impl StoreState {
    /// Document for one collection.
    #[must_use]
    pub fn document(&self, kind: CollectionKind) -> &PresetDocument {
        &self.documents[kind.index()]
    }

    /// Mutable document for one collection.
    pub fn document_mut(&mut self, kind: CollectionKind) -> &mut PresetDocument {
        &mut self.documents[kind.index()]
    }
}

/// A history entry: a full-store state plus what the edit was.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Human-readable description, e.g. "Rename shader: a -> b".
    pub label: String,
    /// State of every collection.
    pub state: StoreState,
}

/// Bounded undo stack plus redo stack.
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: VecDeque<Snapshot>,
    redo_stack: Vec<Snapshot>,
    max_levels: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(MAX_UNDO_LEVELS)
    }
}

impl History {
    /// Creates a history keeping at most `max_levels` undo entries (minimum 1).
    #[must_use]
    pub fn new(max_levels: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_levels: max_levels.max(1),
        }
    }

    /// Records the state from before an edit. Clears the redo stack.
    pub fn push(&mut self, label: impl Into<String>, state: StoreState) {
        let label = label.into();
        self.redo_stack.clear();
        self.push_undo_entry(Snapshot { label, state });
        debug!(undo_depth = self.undo_stack.len(), "History entry pushed");
    }

    /// Steps back: stores `current` for redo and returns the state to restore.
    pub fn undo(&mut self, current: StoreState) -> Option<StoreState> {
        let entry = self.undo_stack.pop_back()?;
        debug!(label = %entry.label, undo_remaining = self.undo_stack.len(), "Undo");
        self.redo_stack.push(Snapshot {
            label: entry.label,
            state: current,
        });
        Some(entry.state)
    }

    /// Steps forward: stores `current` for undo and returns the state to restore.
    pub fn redo(&mut self, current: StoreState) -> Option<StoreState> {
        let entry = self.redo_stack.pop()?;
        debug!(label = %entry.label, redo_remaining = self.redo_stack.len(), "Redo");
        self.push_undo_entry(Snapshot {
            label: entry.label,
            state: current,
        });
        Some(entry.state)
    }

    /// Drops all history.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Whether there is anything to undo.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Whether there is anything to redo.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of undo entries.
    #[must_use]
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of redo entries.
    #[must_use]
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Label of the edit the next undo reverts.
    #[must_use]
    pub fn undo_label(&self) -> Option<&str> {
        self.undo_stack.back().map(|s| s.label.as_str())
    }

    /// Label of the edit the next redo re-applies.
    #[must_use]
    pub fn redo_label(&self) -> Option<&str> {
        self.redo_stack.last().map(|s| s.label.as_str())
    }

    /// Maximum undo depth.
    #[must_use]
    pub fn max_levels(&self) -> usize {
        self.max_levels
    }

    fn push_undo_entry(&mut self, snapshot: Snapshot) {
        self.undo_stack.push_back(snapshot);
        while self.undo_stack.len() > self.max_levels {
            if let Some(evicted) = self.undo_stack.pop_front() {
                debug!(label = %evicted.label, "Oldest history entry evicted");
            }
        }
    }
}
