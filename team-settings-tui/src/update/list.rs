//! 团队列表更新

use crate::message::ListMessage;
use crate::model::App;

use super::navigation;

pub fn update(app: &mut App, msg: ListMessage) {
    match msg {
        ListMessage::SelectPrevious => app.team_list.select_previous(),
        ListMessage::SelectNext => app.team_list.select_next(),
        ListMessage::Open => {
            let Some(team) = app.team_list.selected_team() else {
                return;
            };
            let address = app.backend.routes().record_address(&team.key());
            app.clear_status();
            navigation::navigate(app, &address);
        }
    }
}
