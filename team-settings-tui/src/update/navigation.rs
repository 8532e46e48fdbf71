//! 地址导航
//!
//! 编辑器发出的地址（改名后的新地址、移除后的列表地址）和用户在列表中
//! 的选择都经过这里，解析为页面后加载数据。

use team_settings_core::Route;

use crate::backend::StatusLevel;
use crate::model::{App, Page};

/// 跳转到地址
pub fn navigate(app: &mut App, address: &str) {
    match app.backend.routes().parse(address) {
        Some(Route::TeamList { org_id }) => {
            log::debug!("Navigating to team list of {org_id}");
            app.team_settings.unmount();
            app.team_settings.key = None;
            app.team_list.org_id.clone_from(&org_id);
            app.team_list.loading = true;
            app.current_page = Page::TeamList;
            app.backend.load_teams(&org_id);
        }
        Some(Route::TeamSettings(key)) => {
            // 改名时会先后收到跳转与强制刷新，同一地址只加载一次
            if app.current_page == Page::TeamSettings && app.team_settings.is_loading(&key) {
                return;
            }
            log::debug!("Navigating to settings of {key}");
            app.team_settings.open(key.clone(), address.to_string());
            app.current_page = Page::TeamSettings;
            app.backend.load_team(key);
        }
        None => {
            log::warn!("Ignoring navigation to unknown address {address}");
            app.set_status(StatusLevel::Error, format!("Unknown address: {address}"));
        }
    }
}
