//! 字段状态类型定义

use serde::{Deserialize, Serialize};

use super::outcome::SaveOrigin;

/// Opaque field value, passed through to the persistence API untouched.
pub type FieldValue = serde_json::Value;

/// Save lifecycle of a single field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SaveState {
    /// Pending value equals the committed value
    #[default]
    Clean,
    /// Edited locally, not yet submitted
    Dirty,
    /// One persistence request outstanding
    Saving,
    /// Last request succeeded
    Saved,
    /// Last request failed and the field was reverted
    Errored,
}

impl SaveState {
    #[must_use]
    pub fn is_saving(self) -> bool {
        self == Self::Saving
    }
}

/// Bounded undo stack. Pushing past the depth drops the oldest entry.
#[derive(Debug, Clone, PartialEq)]
pub struct UndoStack {
    entries: Vec<FieldValue>,
    depth: usize,
}

impl UndoStack {
    /// Stack of the given depth (a depth of 0 disables undo).
    #[must_use]
    pub fn with_depth(depth: usize) -> Self {
        Self {
            entries: Vec::with_capacity(depth),
            depth,
        }
    }

    /// Single-level undo, the editor's default.
    #[must_use]
    pub fn single() -> Self {
        Self::with_depth(1)
    }

    pub fn push(&mut self, value: FieldValue) {
        if self.depth == 0 {
            return;
        }
        if self.entries.len() == self.depth {
            self.entries.remove(0);
        }
        self.entries.push(value);
    }

    pub fn pop(&mut self) -> Option<FieldValue> {
        self.entries.pop()
    }

    #[must_use]
    pub fn peek(&self) -> Option<&FieldValue> {
        self.entries.last()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::single()
    }
}

/// Bookkeeping for the one request a field may have outstanding.
#[derive(Debug, Clone, PartialEq)]
pub struct InFlight {
    /// Value sent to the server
    pub value: FieldValue,
    pub origin: SaveOrigin,
    /// Committed value to restore if an undo-save fails
    pub rollback: Option<FieldValue>,
}

/// One editable attribute of a record.
///
/// Fields are only mutated through `RecordModel`, which in turn is only
/// handed out mutably to the save coordinator.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldModel {
    pub(crate) id: String,
    pub(crate) committed_value: FieldValue,
    pub(crate) pending_value: FieldValue,
    pub(crate) save_state: SaveState,
    pub(crate) undo: UndoStack,
    pub(crate) in_flight: Option<InFlight>,
    /// An edit arrived while `Saving`; submit it once the current request resolves.
    pub(crate) queued: bool,
}

impl FieldModel {
    /// Clean field seeded with its persisted value
    #[must_use]
    pub fn new(id: impl Into<String>, value: FieldValue) -> Self {
        Self {
            id: id.into(),
            committed_value: value.clone(),
            pending_value: value,
            save_state: SaveState::Clean,
            undo: UndoStack::single(),
            in_flight: None,
            queued: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn committed_value(&self) -> &FieldValue {
        &self.committed_value
    }

    pub fn pending_value(&self) -> &FieldValue {
        &self.pending_value
    }

    pub fn save_state(&self) -> SaveState {
        self.save_state
    }

    /// Value an undo would restore, if any.
    pub fn previous_committed_value(&self) -> Option<&FieldValue> {
        self.undo.peek()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty() && !self.save_state.is_saving()
    }

    pub fn in_flight(&self) -> Option<&InFlight> {
        self.in_flight.as_ref()
    }

    pub fn has_queued_edit(&self) -> bool {
        self.queued
    }

    /// Whether the pending value differs from what is persisted.
    pub fn is_modified(&self) -> bool {
        self.pending_value != self.committed_value
    }
}
