//! 团队设置消息类型

/// 团队设置页相关消息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMessage {
    /// 下一个字段（当前字段失焦并保存）
    NextField,

    /// 上一个字段（当前字段失焦并保存）
    PrevField,

    /// 输入字符
    Input(char),

    /// 删除字符（Backspace）
    Backspace,

    /// 撤销焦点字段的上一次修改
    Undo,

    /// 请求移除团队
    TriggerRemoval,

    /// 确认移除
    ConfirmRemoval,

    /// 取消移除
    CancelRemoval,
}
