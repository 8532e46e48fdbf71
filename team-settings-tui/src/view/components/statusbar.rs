//! 底部状态栏组件

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use team_settings_core::types::RemovalState;

use crate::backend::StatusLevel;
use crate::model::{App, Page};
use crate::view::theme::{colors, Styles};

/// 渲染状态栏
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let hints = get_hints(app);

    let mut spans = Vec::new();
    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(*key, Styles::hint_key()));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(*desc, Styles::hint_desc()));
    }

    // 状态消息显示在右侧
    if let Some(status) = &app.status {
        let c = colors();
        let color = match status.level {
            StatusLevel::Info => c.success,
            StatusLevel::Progress => Color::Yellow,
            StatusLevel::Error => c.error,
        };
        spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(status.text.clone(), Style::default().fg(color)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Styles::statusbar());
    frame.render_widget(paragraph, area);
}

/// 根据当前页面生成快捷键提示
fn get_hints(app: &App) -> Vec<(&'static str, &'static str)> {
    match app.current_page {
        Page::TeamList => vec![
            ("↑↓", "Select"),
            ("Enter", "Open"),
            ("r", "Refresh"),
            ("q", "Quit"),
        ],
        Page::TeamSettings => {
            let removal = app
                .team_settings
                .view
                .as_ref()
                .map_or(RemovalState::Idle, |v| v.removal_state());
            match removal {
                RemovalState::AwaitingConfirmation => vec![("y", "Confirm"), ("n", "Cancel")],
                RemovalState::Executing => vec![],
                RemovalState::Idle => vec![
                    ("Tab", "Next field"),
                    ("Ctrl+Z", "Undo"),
                    ("Ctrl+D", "Remove"),
                    ("Esc", "Back"),
                ],
            }
        }
    }
}
