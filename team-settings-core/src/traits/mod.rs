//! External collaborator abstraction trait definitions

mod navigation_sink;
mod notification_sink;
mod persistence_api;

pub use navigation_sink::NavigationSink;
pub use notification_sink::NotificationSink;
pub use persistence_api::PersistenceApi;
