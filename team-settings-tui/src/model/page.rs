//! 页面状态定义

/// 页面枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    /// 团队列表
    #[default]
    TeamList,
    /// 团队设置
    TeamSettings,
}

impl Page {
    /// 是否是详情页面（需要返回按钮）
    pub fn is_detail_page(self) -> bool {
        matches!(self, Page::TeamSettings)
    }
}
