//! 字段 schema 定义
//!
//! Schema is data: it tells the editor which fields exist, how to label
//! them and which one carries the record's address. Validation rules are
//! carried for display and for the server; the editor never enforces them.

use serde::{Deserialize, Serialize};

use super::field::FieldValue;

/// Input widget kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    #[default]
    Text,
    Textarea,
    Boolean,
}

/// Normalisation applied to raw input before it becomes the pending value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputTransform {
    #[default]
    None,
    /// Lowercase, whitespace runs collapsed to `-`
    Slugify,
}

impl InputTransform {
    #[must_use]
    pub fn apply(self, value: FieldValue) -> FieldValue {
        match (self, value) {
            (Self::Slugify, FieldValue::String(s)) => FieldValue::String(slugify(&s)),
            (_, value) => value,
        }
    }
}

fn slugify(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_dash = false;
    for ch in input.chars() {
        if ch.is_whitespace() {
            pending_dash = !out.is_empty();
            continue;
        }
        if pending_dash {
            out.push('-');
            pending_dash = false;
        }
        out.extend(ch.to_lowercase());
    }
    // trailing whitespace is kept as a dash so typing "a " then "b" yields "a-b"
    if pending_dash {
        out.push('-');
    }
    out
}

/// Declarative rules surfaced to the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldValidation {
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

/// One field of the settings form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Value is part of the record's address; a change re-addresses the page
    #[serde(default)]
    pub identity: bool,
    #[serde(default)]
    pub transform: InputTransform,
    #[serde(default)]
    pub validation: FieldValidation,
}

/// Default team settings form: slug then display name
#[must_use]
pub fn team_settings_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor {
            id: "slug".to_string(),
            label: "Name".to_string(),
            kind: FieldKind::Text,
            help: Some("A unique ID used to identify the team".to_string()),
            placeholder: Some("e.g. api-team".to_string()),
            identity: true,
            transform: InputTransform::Slugify,
            validation: FieldValidation {
                required: true,
                max_length: Some(50),
                pattern: Some("^[a-z0-9_-]+$".to_string()),
            },
        },
        FieldDescriptor {
            id: "name".to_string(),
            label: "Display Name".to_string(),
            kind: FieldKind::Text,
            help: Some("The name of your team".to_string()),
            placeholder: Some("e.g. API Team".to_string()),
            identity: false,
            transform: InputTransform::None,
            validation: FieldValidation {
                required: true,
                max_length: Some(64),
                pattern: None,
            },
        },
    ]
}
