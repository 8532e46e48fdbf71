//! 页面视图

pub mod team_list;
pub mod team_settings;
