//! Editor configuration
//!
//! Loaded from camelCase JSON; every key is optional and falls back to the
//! team settings defaults.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{team_settings_fields, FieldDescriptor, RecordKey};

const ORG_PLACEHOLDER: &str = "{orgId}";
const TEAM_PLACEHOLDER: &str = "{teamId}";

/// Address templates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RouteConfig {
    /// Settings page of one team
    pub record_path: String,
    /// Team list of an organization
    pub list_path: String,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            record_path: "/settings/{orgId}/teams/{teamId}/settings/".to_string(),
            list_path: "/settings/{orgId}/teams/".to_string(),
        }
    }
}

/// A parsed address
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    TeamList { org_id: String },
    TeamSettings(RecordKey),
}

impl RouteConfig {
    #[must_use]
    pub fn record_address(&self, key: &RecordKey) -> String {
        self.record_path
            .replace(ORG_PLACEHOLDER, &key.org_id)
            .replace(TEAM_PLACEHOLDER, &key.team_id)
    }

    #[must_use]
    pub fn list_address(&self, org_id: &str) -> String {
        self.list_path.replace(ORG_PLACEHOLDER, org_id)
    }

    /// List address derived from the current location by dropping the
    /// record's own segment and everything after it. Falls back to the list
    /// template when the location is not this record's address.
    #[must_use]
    pub fn list_address_from(&self, location: &str, key: &RecordKey) -> String {
        let path = location.split(['?', '#']).next().unwrap_or(location);
        let fallback = || self.list_address(&key.org_id);

        match match_template(&self.record_path, path) {
            Some((_, Some(team))) if team == key.team_id => {}
            _ => return fallback(),
        }
        let Some(cut) = self
            .record_path
            .trim_matches('/')
            .split('/')
            .position(|segment| segment == TEAM_PLACEHOLDER)
        else {
            return fallback();
        };

        let kept: Vec<&str> = path.trim_matches('/').split('/').take(cut).collect();
        if kept.is_empty() {
            "/".to_string()
        } else {
            format!("/{}/", kept.join("/"))
        }
    }

    /// Match an address against the templates.
    #[must_use]
    pub fn parse(&self, address: &str) -> Option<Route> {
        let path = address.split(['?', '#']).next().unwrap_or(address);
        if let Some((org, team)) = match_template(&self.record_path, path) {
            return Some(Route::TeamSettings(RecordKey::new(org?, team?)));
        }
        if let Some((org, _)) = match_template(&self.list_path, path) {
            return Some(Route::TeamList { org_id: org? });
        }
        None
    }

    fn validate(&self) -> CoreResult<()> {
        if !self.record_path.contains(ORG_PLACEHOLDER) || !self.record_path.contains(TEAM_PLACEHOLDER)
        {
            return Err(CoreError::Configuration(format!(
                "recordPath must contain {ORG_PLACEHOLDER} and {TEAM_PLACEHOLDER}: {}",
                self.record_path
            )));
        }
        if !self.list_path.contains(ORG_PLACEHOLDER) {
            return Err(CoreError::Configuration(format!(
                "listPath must contain {ORG_PLACEHOLDER}: {}",
                self.list_path
            )));
        }
        Ok(())
    }
}

/// Segment-wise template match. Returns the captured org/team values.
#[allow(clippy::type_complexity)]
fn match_template(template: &str, path: &str) -> Option<(Option<String>, Option<String>)> {
    let expected: Vec<&str> = template.trim_matches('/').split('/').collect();
    let actual: Vec<&str> = path.trim_matches('/').split('/').collect();
    if expected.len() != actual.len() {
        return None;
    }

    let mut org = None;
    let mut team = None;
    for (want, got) in expected.iter().zip(&actual) {
        if got.is_empty() {
            return None;
        }
        match *want {
            ORG_PLACEHOLDER => org = Some((*got).to_string()),
            TEAM_PLACEHOLDER => team = Some((*got).to_string()),
            literal if literal == *got => {}
            _ => return None,
        }
    }
    Some((org, team))
}

/// User-visible texts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Messages {
    pub title: String,
    pub identity_changed: String,
    pub save_failed: String,
    pub removal_title: String,
    pub removal_help: String,
    /// `{team}` is replaced with `#<slug>`
    pub removal_prompt: String,
    pub removal_failed: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            title: "Team Settings".to_string(),
            identity_changed: "Slug changed, refreshing page...".to_string(),
            save_failed: "Unable to save change".to_string(),
            removal_title: "Remove Team".to_string(),
            removal_help:
                "This may affect team members' access to projects and associated alert delivery."
                    .to_string(),
            removal_prompt: "Are you sure you want to remove the team {team}?".to_string(),
            removal_failed: "Unable to remove team".to_string(),
        }
    }
}

impl Messages {
    #[must_use]
    pub fn removal_prompt_for(&self, key: &RecordKey) -> String {
        self.removal_prompt
            .replace("{team}", &format!("#{}", key.team_id))
    }
}

/// Editor configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Field schema in display order
    pub fields: Vec<FieldDescriptor>,
    pub routes: RouteConfig,
    /// Capability token that unlocks the removal action
    pub required_permission: String,
    /// Also request a full reload after an identity change
    pub hard_reload_on_identity_change: bool,
    pub messages: Messages,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            fields: team_settings_fields(),
            routes: RouteConfig::default(),
            required_permission: "team:admin".to_string(),
            hard_reload_on_identity_change: true,
            messages: Messages::default(),
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| CoreError::SerializationError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON file
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CoreError::StorageError(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&content)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.fields.is_empty() {
            return Err(CoreError::Configuration(
                "field schema is empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if field.id.trim().is_empty() {
                return Err(CoreError::Configuration(
                    "field id cannot be empty".to_string(),
                ));
            }
            if !seen.insert(field.id.as_str()) {
                return Err(CoreError::Configuration(format!(
                    "duplicate field id: {}",
                    field.id
                )));
            }
        }

        if self.required_permission.trim().is_empty() {
            return Err(CoreError::Configuration(
                "requiredPermission cannot be empty".to_string(),
            ));
        }

        self.routes.validate()
    }

    /// Schema entry for a field
    #[must_use]
    pub fn field(&self, id: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.id == id)
    }
}
