//! 后台结果处理

use team_settings_core::types::RecordKey;

use crate::backend::{BackendEvent, StatusLevel, Team};
use crate::model::{App, Page};

use super::navigation;

pub fn update(app: &mut App, event: BackendEvent) {
    match event {
        BackendEvent::Status { level, text } => app.set_status(level, text),

        BackendEvent::Navigate(address) | BackendEvent::Reload(address) => {
            navigation::navigate(app, &address);
        }

        BackendEvent::TeamsLoaded { org_id, result } => {
            if app.team_list.org_id != org_id {
                return;
            }
            match result {
                Ok(teams) => {
                    app.team_list.set_teams(teams);
                    if matches!(&app.status, Some(s) if s.level == StatusLevel::Progress) {
                        app.clear_status();
                    }
                }
                Err(e) => app.team_list.set_error(e),
            }
        }

        BackendEvent::TeamLoaded { key, result } => on_team_loaded(app, &key, result),

        BackendEvent::SaveResolved(outcome) => {
            let Some(view) = app.team_settings.view.as_mut() else {
                return;
            };
            match view.apply_save_outcome(outcome) {
                Ok(Some(next)) => app.backend.submit_save(next),
                Ok(None) => {}
                Err(e) => log::error!("Failed to apply save outcome: {e}"),
            }
        }

        BackendEvent::RemovalResolved(outcome) => {
            if let Some(view) = app.team_settings.view.as_mut() {
                // 成功时编辑器会请求跳回列表
                view.apply_removal_outcome(outcome);
            }
        }
    }
}

fn on_team_loaded(app: &mut App, key: &RecordKey, result: Result<Option<Team>, String>) {
    if app.current_page != Page::TeamSettings || !app.team_settings.is_loading(key) {
        log::debug!("Dropping stale load of {key}");
        return;
    }

    match result {
        Ok(Some(team)) => match app.backend.mount(&team) {
            Ok(view) => {
                let address = app.team_settings.address.clone();
                app.team_settings.view = Some(view.with_location(address));
                if matches!(&app.status, Some(s) if s.level == StatusLevel::Progress) {
                    app.clear_status();
                }
            }
            Err(e) => {
                log::error!("Failed to mount {key}: {e}");
                app.set_status(StatusLevel::Error, e.to_string());
            }
        },
        Ok(None) => {
            app.set_status(StatusLevel::Error, format!("Team {} not found", key.team_id));
            let address = app.backend.routes().list_address(&key.org_id);
            navigation::navigate(app, &address);
        }
        Err(e) => app.set_status(StatusLevel::Error, e),
    }
}
