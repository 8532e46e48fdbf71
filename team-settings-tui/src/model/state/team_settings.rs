//! 团队设置页面状态

use team_settings_core::types::RecordKey;
use team_settings_core::TeamSettingsView;

/// 团队设置页面状态
#[derive(Default)]
pub struct TeamSettingsState {
    /// 正在展示的团队
    pub key: Option<RecordKey>,
    /// 当前地址
    pub address: String,
    /// 已挂载的编辑器（加载中为 None）
    pub view: Option<TeamSettingsView>,
    /// 焦点字段索引
    pub focused: usize,
}

impl TeamSettingsState {
    /// 开始加载某个团队，卸载当前编辑器
    pub fn open(&mut self, key: RecordKey, address: String) {
        self.unmount();
        self.key = Some(key);
        self.address = address;
        self.focused = 0;
    }

    /// 卸载编辑器，之后返回的结果都会被忽略
    pub fn unmount(&mut self) {
        if let Some(mut view) = self.view.take() {
            view.unmount();
        }
    }

    /// 是否正在加载 `key`
    pub fn is_loading(&self, key: &RecordKey) -> bool {
        self.view.is_none() && self.key.as_ref() == Some(key)
    }

    /// 当前焦点字段 id
    pub fn focused_field(&self) -> Option<String> {
        let view = self.view.as_ref()?;
        view.coordinator()
            .model()
            .fields()
            .nth(self.focused)
            .map(|f| f.id().to_string())
    }

    fn field_count(&self) -> usize {
        self.view
            .as_ref()
            .map_or(0, |v| v.coordinator().model().fields().count())
    }

    pub fn focus_next(&mut self) {
        let count = self.field_count();
        if count > 0 {
            self.focused = (self.focused + 1) % count;
        }
    }

    pub fn focus_previous(&mut self) {
        let count = self.field_count();
        if count > 0 {
            self.focused = (self.focused + count - 1) % count;
        }
    }
}
