//! 应用主状态结构

use tokio::sync::mpsc::UnboundedReceiver;

use crate::backend::{BackendEvent, CoreService, StatusLevel};

use super::{Page, StatusLine, TeamListState, TeamSettingsState};

/// 应用主状态
pub struct App {
    /// 是否应该退出
    pub should_quit: bool,

    /// 当前页面
    pub current_page: Page,

    /// 状态栏消息
    pub status: Option<StatusLine>,

    // === 各页面状态 ===
    /// 团队列表页面状态
    pub team_list: TeamListState,
    /// 团队设置页面状态
    pub team_settings: TeamSettingsState,

    /// 后台服务
    pub backend: CoreService,
    /// 后台事件接收端
    pub events: UnboundedReceiver<BackendEvent>,
}

impl App {
    /// 创建新的应用实例，并开始加载团队列表
    pub fn new(backend: CoreService, events: UnboundedReceiver<BackendEvent>) -> Self {
        let org_id = backend.org_id().to_string();
        backend.load_teams(&org_id);

        Self {
            should_quit: false,
            current_page: Page::TeamList,
            status: None,
            team_list: TeamListState::loading(org_id),
            team_settings: TeamSettingsState::default(),
            backend,
            events,
        }
    }

    /// 设置状态消息
    pub fn set_status(&mut self, level: StatusLevel, text: impl Into<String>) {
        self.status = Some(StatusLine {
            level,
            text: text.into(),
        });
    }

    /// 清除状态消息
    pub fn clear_status(&mut self) {
        self.status = None;
    }
}
