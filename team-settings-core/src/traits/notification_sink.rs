//! User notification abstract Trait

use crate::types::FieldChange;

/// Fire-and-forget toast/status sink
pub trait NotificationSink: Send + Sync {
    /// Something failed and the user should know
    fn notify_error(&self, message: &str);

    /// Long-running work started (e.g. a page refresh)
    fn notify_progress(&self, message: &str);

    /// A field was saved; hosts may offer an undo affordance
    fn notify_success(&self, _change: &FieldChange) {}
}
