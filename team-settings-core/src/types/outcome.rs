//! Persistence requests and their tagged outcomes
//!
//! A request is a detached description of one remote call. Hosts may run it
//! on whatever executor they like and feed the outcome back into the owning
//! coordinator or action, which applies it as a pure state transition.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::traits::PersistenceApi;

use super::field::FieldValue;
use super::record_key::RecordKey;

/// Record state returned by a successful update.
pub type RecordSnapshot = serde_json::Map<String, FieldValue>;

/// Why a save was issued
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SaveOrigin {
    /// The user edited the field and moved focus away
    Edit,
    /// The user undid the last change
    Undo,
}

/// One field update to submit
#[derive(Debug, Clone, PartialEq)]
pub struct SaveRequest {
    /// Mount generation of the record that issued the request
    pub epoch: u64,
    pub key: RecordKey,
    pub field_id: String,
    pub value: FieldValue,
    pub origin: SaveOrigin,
}

impl SaveRequest {
    /// Run the request against the persistence API.
    pub async fn execute(self, api: &dyn PersistenceApi) -> SaveOutcome {
        log::debug!(
            "Submitting '{}' for {} ({:?})",
            self.field_id,
            self.key,
            self.origin
        );
        let result = api.update_field(&self.key, &self.field_id, &self.value).await;
        SaveOutcome {
            epoch: self.epoch,
            field_id: self.field_id,
            value: self.value,
            origin: self.origin,
            result,
        }
    }
}

/// Result of a field update, tagged with the request it answers
#[derive(Debug, Clone, PartialEq)]
pub struct SaveOutcome {
    pub epoch: u64,
    pub field_id: String,
    /// Value that was sent
    pub value: FieldValue,
    pub origin: SaveOrigin,
    pub result: Result<RecordSnapshot, ApiError>,
}

/// Change info handed to the success notification (drives the undo toast).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldChange {
    pub field_id: String,
    pub old: FieldValue,
    pub new: FieldValue,
    pub origin: SaveOrigin,
    pub changed_at: DateTime<Utc>,
}

/// Removal lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RemovalState {
    #[default]
    Idle,
    AwaitingConfirmation,
    Executing,
}

/// Confirmed removal to submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalRequest {
    pub epoch: u64,
    pub key: RecordKey,
}

impl RemovalRequest {
    pub async fn execute(self, api: &dyn PersistenceApi) -> RemovalOutcome {
        log::info!("Removing {}", self.key);
        let result = api.remove_record(&self.key).await;
        RemovalOutcome {
            epoch: self.epoch,
            key: self.key,
            result,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RemovalOutcome {
    pub epoch: u64,
    pub key: RecordKey,
    pub result: Result<(), ApiError>,
}
