//! Team Settings Core Library
//!
//! Autosaving record editor for a team settings page:
//! - per-field save-on-blur with revert on failure
//! - single-level undo of the last successful change
//! - re-addressing the page when the team's slug changes
//! - confirmation-gated team removal
//!
//! The library is host-agnostic. Persistence, notifications and routing are
//! injected through the traits in [`traits`].

pub mod config;
pub mod error;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use config::{EditorConfig, Messages, Route, RouteConfig};
pub use error::{ApiError, CoreError, CoreResult};
pub use services::{
    removal_offered, EditorContext, RecordModel, RemovalAction, SaveCoordinator,
    TeamSettingsView,
};
pub use traits::{NavigationSink, NotificationSink, PersistenceApi};
