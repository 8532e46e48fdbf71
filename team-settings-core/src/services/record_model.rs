//! 记录模型
//!
//! Owns the fields of one remote record. Every mutation goes through the
//! save coordinator, which is the only holder of a `&mut RecordModel`.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{CoreError, CoreResult};
use crate::types::{FieldDescriptor, FieldModel, FieldValue, InFlight, RecordKey, SaveState};

/// Mount generations are unique for the life of the process.
static NEXT_EPOCH: AtomicU64 = AtomicU64::new(1);

fn next_epoch() -> u64 {
    NEXT_EPOCH.fetch_add(1, Ordering::Relaxed)
}

/// What an undo swapped in and out
#[derive(Debug, Clone, PartialEq)]
pub struct UndoApplied {
    /// Value now committed and pending
    pub restored: FieldValue,
    /// Committed value it replaced
    pub replaced: FieldValue,
}

/// One remote record and its editable fields, in display order
#[derive(Debug, Clone)]
pub struct RecordModel {
    key: RecordKey,
    fields: Vec<FieldModel>,
    initial_data: Vec<(String, FieldValue)>,
    epoch: u64,
}

impl RecordModel {
    /// Seed every field as `Clean` with its initial value.
    pub fn initialize(
        key: RecordKey,
        initial_data: impl IntoIterator<Item = (String, FieldValue)>,
    ) -> CoreResult<Self> {
        key.validate()?;

        let initial_data: Vec<(String, FieldValue)> = initial_data.into_iter().collect();
        let mut fields: Vec<FieldModel> = Vec::with_capacity(initial_data.len());
        for (id, value) in &initial_data {
            if fields.iter().any(|f| f.id == *id) {
                return Err(CoreError::Configuration(format!(
                    "duplicate field id in initial data: {id}"
                )));
            }
            fields.push(FieldModel::new(id.clone(), value.clone()));
        }

        let epoch = next_epoch();
        log::debug!("Record {key} mounted with {} fields (epoch {epoch})", fields.len());

        Ok(Self {
            key,
            fields,
            initial_data,
            epoch,
        })
    }

    /// Seed fields in schema order; values missing from `data` start as `null`.
    pub fn from_schema(
        key: RecordKey,
        schema: &[FieldDescriptor],
        data: &serde_json::Map<String, FieldValue>,
    ) -> CoreResult<Self> {
        Self::initialize(
            key,
            schema.iter().map(|descriptor| {
                (
                    descriptor.id.clone(),
                    data.get(&descriptor.id).cloned().unwrap_or_default(),
                )
            }),
        )
    }

    pub fn record_key(&self) -> &RecordKey {
        &self.key
    }

    /// Snapshot supplied at construction
    pub fn initial_data(&self) -> &[(String, FieldValue)] {
        &self.initial_data
    }

    /// Mount generation; outcomes tagged with another epoch are stale.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldModel> {
        self.fields.iter()
    }

    pub fn field(&self, id: &str) -> CoreResult<&FieldModel> {
        self.fields
            .iter()
            .find(|f| f.id == id)
            .ok_or_else(|| CoreError::FieldNotFound(id.to_string()))
    }

    fn field_mut(&mut self, id: &str) -> CoreResult<&mut FieldModel> {
        self.fields
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| CoreError::FieldNotFound(id.to_string()))
    }

    /// Pending (displayed) value of a field
    pub fn get_value(&self, id: &str) -> CoreResult<&FieldValue> {
        self.field(id).map(FieldModel::pending_value)
    }

    /// Record an edit without persisting it.
    ///
    /// A field with a request outstanding stays `Saving`; the edit is picked
    /// up when that request resolves.
    pub fn set_pending_value(&mut self, id: &str, value: FieldValue) -> CoreResult<SaveState> {
        let field = self.field_mut(id)?;
        field.pending_value = value;

        if field.save_state.is_saving() {
            field.queued = field
                .in_flight
                .as_ref()
                .is_some_and(|f| f.value != field.pending_value);
        } else if field.pending_value == field.committed_value {
            field.save_state = SaveState::Clean;
        } else {
            field.save_state = SaveState::Dirty;
        }
        Ok(field.save_state)
    }

    /// Successful save: the value becomes committed and the prior committed
    /// value moves into the undo slot.
    pub fn commit(&mut self, id: &str, value: FieldValue) -> CoreResult<()> {
        let field = self.field_mut(id)?;
        let prior = std::mem::replace(&mut field.committed_value, value.clone());
        field.undo.push(prior);
        field.pending_value = value;
        field.save_state = SaveState::Saved;
        field.in_flight = None;
        field.queued = false;
        Ok(())
    }

    /// Successful undo-save: commit without refilling the undo slot.
    pub(crate) fn commit_restored(&mut self, id: &str, value: FieldValue) -> CoreResult<()> {
        let field = self.field_mut(id)?;
        field.committed_value = value.clone();
        field.pending_value = value;
        field.save_state = SaveState::Saved;
        field.in_flight = None;
        field.queued = false;
        Ok(())
    }

    /// Failed save: discard the edit.
    pub fn revert(&mut self, id: &str) -> CoreResult<()> {
        let field = self.field_mut(id)?;
        field.pending_value = field.committed_value.clone();
        field.save_state = SaveState::Errored;
        field.in_flight = None;
        field.queued = false;
        Ok(())
    }

    /// Failed undo-save: put back what the server still holds and re-arm
    /// the undo slot so the user can try again.
    pub(crate) fn rollback_undo(
        &mut self,
        id: &str,
        server_value: FieldValue,
        undo_target: FieldValue,
    ) -> CoreResult<()> {
        let field = self.field_mut(id)?;
        field.committed_value = server_value;
        field.undo.push(undo_target);
        self.revert(id)
    }

    /// Restore the previous committed value as both committed and pending.
    ///
    /// Returns `None` (and changes nothing) when the undo slot is empty or a
    /// save is outstanding. The caller is responsible for persisting the
    /// restored value.
    pub fn undo(&mut self, id: &str) -> CoreResult<Option<UndoApplied>> {
        let field = self.field_mut(id)?;
        if field.save_state.is_saving() {
            return Ok(None);
        }
        let Some(restored) = field.undo.pop() else {
            return Ok(None);
        };

        let replaced = std::mem::replace(&mut field.committed_value, restored.clone());
        field.pending_value = restored.clone();
        Ok(Some(UndoApplied { restored, replaced }))
    }

    /// Flag a field as having exactly one request outstanding.
    pub(crate) fn mark_saving(&mut self, id: &str, in_flight: InFlight) -> CoreResult<()> {
        let field = self.field_mut(id)?;
        field.save_state = SaveState::Saving;
        field.in_flight = Some(in_flight);
        field.queued = false;
        Ok(())
    }
}
