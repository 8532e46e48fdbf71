//!
//! src/update/mod.rs
//! Update 层：状态更新逻辑
//!
//! Update 层负责处理 Message，更新 Model 状态。
//! 是唯一可以修改 Model 的地方。
//!
//!
//! 有模块结构：
//!     src/update/mod.rs
//!         mod backend;            // 后台结果处理
//!         mod editor;             // 团队设置页子消息处理
//!         mod list;               // 团队列表页子消息处理
//!         mod navigation;         // 地址 -> 页面
//!
//!
//!     远程调用从不在 Update 层中等待：
//!         - 编辑器给出 SaveRequest / RemovalRequest；
//!         - CoreService 在 tokio 任务中执行；
//!         - 结果以 AppMessage::Backend 回到这里，再交给编辑器应用。
//!
//!     因此所有状态变更都发生在主循环这一个逻辑线程上。
//!

mod backend;
mod editor;
mod list;
mod navigation;

use crate::backend::StatusLevel;
use crate::message::AppMessage;
use crate::model::{App, Page};

/// 处理应用消息，更新状态
pub fn update(app: &mut App, msg: AppMessage) {
    match msg {
        AppMessage::Quit => {
            app.team_settings.unmount();
            app.should_quit = true;
        }

        AppMessage::GoBack => {
            if app.current_page.is_detail_page() {
                // 离开页面前先让焦点字段失焦（触发保存）
                editor::blur_focused(app);
                let org_id = app.backend.org_id().to_string();
                let address = app.backend.routes().list_address(&org_id);
                navigation::navigate(app, &address);
            }
        }

        AppMessage::Refresh => {
            if app.current_page == Page::TeamList {
                app.team_list.loading = true;
                app.backend.load_teams(&app.team_list.org_id);
                app.set_status(StatusLevel::Progress, "Refreshing...");
            }
        }

        AppMessage::List(list_msg) => {
            list::update(app, list_msg);
        }

        AppMessage::Editor(editor_msg) => {
            editor::update(app, editor_msg);
        }

        AppMessage::Backend(event) => {
            backend::update(app, event);
        }

        AppMessage::Noop => {}
    }
}
