//! 业务逻辑服务层

mod record_model;
mod removal_action;
mod save_coordinator;
mod team_settings_view;

pub use record_model::{RecordModel, UndoApplied};
pub use removal_action::{removal_offered, RemovalAction};
pub use save_coordinator::SaveCoordinator;
pub use team_settings_view::TeamSettingsView;

use std::sync::Arc;

use crate::config::EditorConfig;
use crate::error::ApiError;
use crate::traits::{NavigationSink, NotificationSink, PersistenceApi};

/// 编辑器上下文 - 持有所有外部协作者
///
/// 宿主层需要创建此上下文，并注入平台特定的实现。
pub struct EditorContext {
    /// 远程持久化 API
    pub api: Arc<dyn PersistenceApi>,
    /// 用户通知
    pub notifier: Arc<dyn NotificationSink>,
    /// 路由跳转
    pub navigator: Arc<dyn NavigationSink>,
    /// 编辑器配置
    pub config: Arc<EditorConfig>,
}

impl EditorContext {
    /// 创建编辑器上下文
    #[must_use]
    pub fn new(
        api: Arc<dyn PersistenceApi>,
        notifier: Arc<dyn NotificationSink>,
        navigator: Arc<dyn NavigationSink>,
        config: Arc<EditorConfig>,
    ) -> Self {
        Self {
            api,
            notifier,
            navigator,
            config,
        }
    }

    /// 记录远程错误并通知用户
    pub(crate) fn report_api_error(&self, context: &str, err: &ApiError, message: &str) {
        if err.is_expected() {
            log::warn!("{context}: {err}");
        } else {
            log::error!("{context}: {err}");
        }
        self.notifier.notify_error(message);
    }
}
