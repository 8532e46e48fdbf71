//! 团队列表消息类型

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMessage {
    SelectPrevious,
    SelectNext,
    /// 打开选中团队的设置页
    Open,
}
