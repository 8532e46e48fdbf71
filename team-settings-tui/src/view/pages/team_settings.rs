//! 团队设置页面视图

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};
use serde_json::Value;
use team_settings_core::types::{FieldView, RemovalPanel, SaveState};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::model::App;
use crate::view::theme::colors;

/// 标签宽度（基于显示宽度）
const LABEL_WIDTH: usize = 16;

/// 渲染团队设置页面
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let c = colors();
    let Some(view) = app.team_settings.view.as_ref() else {
        let lines = vec![
            Line::from(""),
            Line::styled("  Loading team...", Style::default().fg(c.muted)),
        ];
        frame.render_widget(Paragraph::new(lines), area);
        return;
    };

    let model = view.render();
    let value_width = usize::from(area.width).saturating_sub(LABEL_WIDTH + 20).max(10);
    let mut lines = vec![Line::from("")];

    if model.loading {
        lines.push(Line::styled(
            "  Reloading team at its new address...",
            Style::default().fg(c.warning),
        ));
        lines.push(Line::from(""));
    }

    for (i, field) in model.fields.iter().enumerate() {
        let focused = i == app.team_settings.focused;
        lines.extend(render_field(field, focused, value_width));
        lines.push(Line::from(""));
    }

    if let Some(panel) = &model.removal {
        lines.extend(render_removal_panel(panel));
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// 渲染单个字段：标签 + 值 + 状态，下一行是帮助信息
fn render_field(field: &FieldView, focused: bool, value_width: usize) -> Vec<Line<'static>> {
    let c = colors();

    let label_style = if focused {
        Style::default()
            .fg(c.highlight)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(c.fg)
    };
    let marker = if focused { "▶ " } else { "  " };

    let (text, value_style) = match &field.value {
        Value::Bool(b) => (
            if *b { "[x]" } else { "[ ]" }.to_string(),
            Style::default().fg(c.fg),
        ),
        Value::String(s) if s.is_empty() && !focused => (
            field.placeholder.clone().unwrap_or_default(),
            Style::default().fg(c.muted),
        ),
        Value::String(s) => (s.clone(), Style::default().fg(c.fg)),
        Value::Null => (String::new(), Style::default().fg(c.fg)),
        other => (other.to_string(), Style::default().fg(c.fg)),
    };
    let mut text = clip_left(&text, value_width);
    if focused && !field.value.is_boolean() {
        text.push('▎');
    }

    let mut spans = vec![
        Span::styled(marker, label_style),
        Span::styled(pad(&field.label, LABEL_WIDTH), label_style),
        Span::styled(text, value_style),
        Span::raw("  "),
    ];
    spans.extend(state_badge(field.state));
    if field.can_undo && focused {
        spans.push(Span::styled("  Ctrl+Z undo", Style::default().fg(Color::Yellow)));
    }

    let mut lines = vec![Line::from(spans)];
    if let Some(help) = &field.help {
        lines.push(Line::styled(
            format!("  {}{help}", " ".repeat(LABEL_WIDTH)),
            Style::default().fg(c.muted),
        ));
    }
    lines
}

fn state_badge(state: SaveState) -> Option<Span<'static>> {
    let c = colors();
    let (text, color) = match state {
        SaveState::Clean => return None,
        SaveState::Dirty => ("● edited", c.warning),
        SaveState::Saving => ("◌ saving...", c.muted),
        SaveState::Saved => ("✓ saved", c.success),
        SaveState::Errored => ("✗ not saved", c.error),
    };
    Some(Span::styled(text, Style::default().fg(color)))
}

/// 渲染移除面板
fn render_removal_panel(panel: &RemovalPanel) -> Vec<Line<'static>> {
    let c = colors();
    vec![
        Line::from(""),
        Line::styled(
            format!("  {}", panel.title),
            Style::default().fg(c.error).add_modifier(Modifier::BOLD),
        ),
        Line::styled(format!("  {}", panel.help), Style::default().fg(c.muted)),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(
                format!(" {} ", panel.button_label),
                Style::default().fg(Color::White).bg(c.error),
            ),
            Span::styled("  Ctrl+D", Style::default().fg(Color::Yellow)),
        ]),
    ]
}

/// 右侧补空格到指定显示宽度
fn pad(text: &str, width: usize) -> String {
    let used = text.width();
    format!("{text}{}", " ".repeat(width.saturating_sub(used)))
}

/// 超出宽度时保留末尾（光标所在的一侧）
fn clip_left(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut kept = Vec::new();
    let mut used = 0;
    for ch in text.chars().rev() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        used += w;
        kept.push(ch);
    }
    kept.push('…');
    kept.iter().rev().collect()
}
