//! 应用主消息枚举

use crate::backend::BackendEvent;

use super::{EditorMessage, ListMessage};

/// 应用主消息
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// 退出应用
    Quit,

    /// 返回上一页
    GoBack,

    /// 刷新当前页面
    Refresh,

    /// 团队列表相关消息
    List(ListMessage),

    /// 团队设置相关消息
    Editor(EditorMessage),

    /// 后台任务结果
    Backend(BackendEvent),

    /// 无操作（用于忽略未处理的事件）
    Noop,
}
