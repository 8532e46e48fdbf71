//! Render model handed to the view layer

use serde::Serialize;

use super::field::{FieldValue, SaveState};
use super::outcome::RemovalState;
use super::schema::FieldKind;

/// Presentation hint for an action; has no effect on behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Severity {
    #[default]
    Default,
    Primary,
    Danger,
}

/// One rendered field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldView {
    pub id: String,
    pub label: String,
    pub kind: FieldKind,
    pub help: Option<String>,
    pub placeholder: Option<String>,
    pub value: FieldValue,
    pub state: SaveState,
    pub can_undo: bool,
}

/// The removal panel, present only when the caller may remove the team
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovalPanel {
    pub title: String,
    pub help: String,
    pub button_label: String,
    pub prompt: String,
    pub severity: Severity,
    pub state: RemovalState,
}

/// Everything the team settings page shows
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel {
    pub title: String,
    /// Interaction suspended until a pending navigation completes
    pub loading: bool,
    pub fields: Vec<FieldView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removal: Option<RemovalPanel>,
}
