//! 团队列表页面状态

use crate::backend::Team;

/// 团队列表页面状态
#[derive(Debug, Default)]
pub struct TeamListState {
    /// 所属组织
    pub org_id: String,
    /// 团队列表
    pub teams: Vec<Team>,
    /// 当前选中的索引
    pub selected: usize,
    /// 是否正在加载
    pub loading: bool,
    /// 错误信息
    pub error: Option<String>,
}

impl TeamListState {
    /// 进入加载状态
    pub fn loading(org_id: impl Into<String>) -> Self {
        Self {
            org_id: org_id.into(),
            loading: true,
            ..Self::default()
        }
    }

    /// 选择上一项
    pub fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    /// 选择下一项
    pub fn select_next(&mut self) {
        if !self.teams.is_empty() && self.selected < self.teams.len() - 1 {
            self.selected += 1;
        }
    }

    /// 获取当前选中的团队
    pub fn selected_team(&self) -> Option<&Team> {
        self.teams.get(self.selected)
    }

    /// 设置团队列表（保持选中位置在范围内）
    pub fn set_teams(&mut self, teams: Vec<Team>) {
        self.selected = self.selected.min(teams.len().saturating_sub(1));
        self.teams = teams;
        self.loading = false;
        self.error = None;
    }

    pub fn set_error(&mut self, error: String) {
        self.loading = false;
        self.error = Some(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teams(n: usize) -> Vec<Team> {
        (0..n)
            .map(|i| Team::new("acme", &format!("team-{i}"), &format!("Team {i}")))
            .collect()
    }

    #[test]
    fn selection_stays_in_range() {
        let mut state = TeamListState::loading("acme");
        state.set_teams(teams(2));
        state.select_next();
        state.select_next();
        assert_eq!(state.selected, 1);

        state.set_teams(teams(1));
        assert_eq!(state.selected, 0);
        assert!(!state.loading);

        state.select_previous();
        assert_eq!(state.selected, 0);
    }
}
