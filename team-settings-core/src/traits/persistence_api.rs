//! Remote persistence abstract Trait

use async_trait::async_trait;

use crate::error::ApiError;
use crate::types::{FieldValue, RecordKey, RecordSnapshot};

/// Remote API owning team records
///
/// Platform implementation:
/// - TUI: `JsonTeamStore` (JSON file)
/// - Tests: `MockPersistenceApi`
#[async_trait]
pub trait PersistenceApi: Send + Sync {
    /// Update a single field (idempotent, PUT-style)
    ///
    /// # Arguments
    /// * `key` - Record address
    /// * `field_id` - Field being saved
    /// * `value` - New value, passed through opaquely
    ///
    /// # Returns
    /// * The record as stored after the update
    async fn update_field(
        &self,
        key: &RecordKey,
        field_id: &str,
        value: &FieldValue,
    ) -> Result<RecordSnapshot, ApiError>;

    /// Remove the record
    ///
    /// # Arguments
    /// * `key` - Record address
    async fn remove_record(&self, key: &RecordKey) -> Result<(), ApiError>;
}
