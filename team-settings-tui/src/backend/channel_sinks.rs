//! 通道通知 / 导航
//!
//! 核心库的回调可能发生在后台任务中，这里统一转成 `BackendEvent`
//! 发回 UI 主循环处理。

use team_settings_core::traits::{NavigationSink, NotificationSink};
use team_settings_core::types::{
    FieldChange, FieldValue, RecordKey, RemovalOutcome, SaveOrigin, SaveOutcome,
};
use tokio::sync::mpsc::UnboundedSender;

use super::team_store::Team;

/// 状态栏消息级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Progress,
    Error,
}

/// 后台发回 UI 的事件
#[derive(Debug, Clone)]
pub enum BackendEvent {
    /// 状态栏消息
    Status { level: StatusLevel, text: String },

    /// 客户端跳转
    Navigate(String),

    /// 强制重新加载地址
    Reload(String),

    /// 团队列表加载完成
    TeamsLoaded {
        org_id: String,
        result: Result<Vec<Team>, String>,
    },

    /// 单个团队加载完成
    TeamLoaded {
        key: RecordKey,
        result: Result<Option<Team>, String>,
    },

    /// 字段保存完成
    SaveResolved(SaveOutcome),

    /// 移除完成
    RemovalResolved(RemovalOutcome),
}

pub(super) fn send(tx: &UnboundedSender<BackendEvent>, event: BackendEvent) {
    if tx.send(event).is_err() {
        log::debug!("UI loop is gone, dropping backend event");
    }
}

fn display(value: &FieldValue) -> String {
    match value.as_str() {
        Some(text) => format!("\"{text}\""),
        None => value.to_string(),
    }
}

/// 通知 -> 状态栏
pub struct ChannelNotifier {
    tx: UnboundedSender<BackendEvent>,
}

impl ChannelNotifier {
    pub fn new(tx: UnboundedSender<BackendEvent>) -> Self {
        Self { tx }
    }

    fn status(&self, level: StatusLevel, text: String) {
        send(&self.tx, BackendEvent::Status { level, text });
    }
}

impl NotificationSink for ChannelNotifier {
    fn notify_error(&self, message: &str) {
        self.status(StatusLevel::Error, message.to_string());
    }

    fn notify_progress(&self, message: &str) {
        self.status(StatusLevel::Progress, message.to_string());
    }

    fn notify_success(&self, change: &FieldChange) {
        let text = match change.origin {
            SaveOrigin::Edit => format!(
                "Changed {} from {} to {} (Ctrl+Z to undo)",
                change.field_id,
                display(&change.old),
                display(&change.new)
            ),
            SaveOrigin::Undo => format!(
                "Restored {} to {}",
                change.field_id,
                display(&change.new)
            ),
        };
        self.status(StatusLevel::Info, text);
    }
}

/// 导航 -> 页面切换
pub struct ChannelNavigator {
    tx: UnboundedSender<BackendEvent>,
}

impl ChannelNavigator {
    pub fn new(tx: UnboundedSender<BackendEvent>) -> Self {
        Self { tx }
    }
}

impl NavigationSink for ChannelNavigator {
    fn navigate_to(&self, address: &str) {
        send(&self.tx, BackendEvent::Navigate(address.to_string()));
    }

    fn hard_reload(&self, address: &str) {
        send(&self.tx, BackendEvent::Reload(address.to_string()));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;
    use tokio::sync::mpsc;

    #[test]
    fn success_mentions_undo() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let notifier = ChannelNotifier::new(tx);

        notifier.notify_success(&FieldChange {
            field_id: "name".to_string(),
            old: json!("Core"),
            new: json!("Platform"),
            origin: SaveOrigin::Edit,
            changed_at: Utc::now(),
        });

        match rx.try_recv().unwrap() {
            BackendEvent::Status { level, text } => {
                assert_eq!(level, StatusLevel::Info);
                assert_eq!(
                    text,
                    "Changed name from \"Core\" to \"Platform\" (Ctrl+Z to undo)"
                );
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn sending_after_the_ui_loop_is_gone_is_harmless() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);

        send(&tx, BackendEvent::Navigate("/settings/acme/teams/".to_string()));
        assert!(tx.is_closed());
    }

    #[test]
    fn navigation_requests_are_forwarded() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let navigator = ChannelNavigator::new(tx);

        navigator.navigate_to("/settings/acme/teams/");
        navigator.hard_reload("/settings/acme/teams/");

        assert!(matches!(rx.try_recv().unwrap(), BackendEvent::Navigate(a) if a == "/settings/acme/teams/"));
        assert!(matches!(rx.try_recv().unwrap(), BackendEvent::Reload(_)));
    }
}
