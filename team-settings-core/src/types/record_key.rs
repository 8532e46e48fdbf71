//! Record address type definitions

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Composite identifier locating one team record remotely.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordKey {
    /// Organization slug
    pub org_id: String,
    /// Team slug (identity-bearing, changes on rename)
    pub team_id: String,
}

impl RecordKey {
    /// Create a new record key
    #[must_use]
    pub fn new(org_id: impl Into<String>, team_id: impl Into<String>) -> Self {
        Self {
            org_id: org_id.into(),
            team_id: team_id.into(),
        }
    }

    /// Reject keys with a missing identity part.
    pub fn validate(&self) -> CoreResult<()> {
        if self.org_id.trim().is_empty() {
            return Err(CoreError::Configuration(
                "record key is missing the organization identifier".to_string(),
            ));
        }
        if self.team_id.trim().is_empty() {
            return Err(CoreError::Configuration(
                "record key is missing the team identifier".to_string(),
            ));
        }
        Ok(())
    }

    /// Same organization, different team slug (used after a rename).
    #[must_use]
    pub fn with_team_id(&self, team_id: impl Into<String>) -> Self {
        Self {
            org_id: self.org_id.clone(),
            team_id: team_id.into(),
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.org_id, self.team_id)
    }
}
