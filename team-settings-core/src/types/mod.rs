//! 类型定义模块

mod capability;
mod field;
mod outcome;
mod record_key;
mod schema;
mod view;

pub use capability::CapabilitySet;
pub use field::{FieldModel, FieldValue, InFlight, SaveState, UndoStack};
pub use outcome::{
    FieldChange, RecordSnapshot, RemovalOutcome, RemovalRequest, RemovalState, SaveOrigin,
    SaveOutcome, SaveRequest,
};
pub use record_key::RecordKey;
pub use schema::{team_settings_fields, FieldDescriptor, FieldKind, FieldValidation, InputTransform};
pub use view::{FieldView, RemovalPanel, Severity, ViewModel};
