//! 页面数据状态

mod team_list;
mod team_settings;

pub use team_list::TeamListState;
pub use team_settings::TeamSettingsState;
