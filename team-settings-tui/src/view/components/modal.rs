//! 移除确认弹窗

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use team_settings_core::types::{RemovalPanel, RemovalState};

use crate::model::{App, Page};

/// 渲染弹窗（移除流程进行中时）
pub fn render(app: &App, frame: &mut Frame) {
    if app.current_page != Page::TeamSettings {
        return;
    }
    let Some(view) = app.team_settings.view.as_ref() else {
        return;
    };
    let Some(panel) = view.render().removal else {
        return;
    };

    match panel.state {
        RemovalState::Idle => {}
        RemovalState::AwaitingConfirmation | RemovalState::Executing => {
            render_confirm_removal(frame, &panel);
        }
    }
}

/// 计算居中弹窗区域
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

fn render_confirm_removal(frame: &mut Frame, panel: &RemovalPanel) {
    let area = centered_rect(52, 9, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", panel.title))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let actions = if panel.state == RemovalState::Executing {
        Line::styled("    Removing...", Style::default().fg(Color::Yellow))
    } else {
        Line::from(vec![
            Span::raw("    "),
            Span::styled(" n Cancel ", Style::default().fg(Color::Black).bg(Color::White)),
            Span::raw("    "),
            Span::styled(
                format!(" y {} ", panel.button_label),
                Style::default().fg(Color::Black).bg(Color::Red),
            ),
        ])
    };

    let lines = vec![
        Line::from(""),
        Line::styled(format!("  {}", panel.prompt), Style::default().fg(Color::White)),
        Line::from(""),
        actions,
    ];

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
