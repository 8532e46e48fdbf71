//! 团队列表页面视图

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::model::App;
use crate::view::theme::{colors, Styles};

/// 渲染团队列表页面
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let c = colors();
    let state = &app.team_list;

    let notice = if state.loading && state.teams.is_empty() {
        Some(Line::styled("  Loading teams...", Style::default().fg(c.muted)))
    } else if let Some(error) = &state.error {
        Some(Line::styled(format!("  {error}"), Style::default().fg(c.error)))
    } else if state.teams.is_empty() {
        Some(Line::styled("  No teams yet", Style::default().fg(c.muted)))
    } else {
        None
    };

    if let Some(line) = notice {
        frame.render_widget(Paragraph::new(vec![Line::from(""), line]), area);
        return;
    }

    render_list(app, frame, area);
}

/// 渲染团队列表
fn render_list(app: &App, frame: &mut Frame, area: Rect) {
    let c = colors();
    let items: Vec<ListItem> = app
        .team_list
        .teams
        .iter()
        .enumerate()
        .map(|(i, team)| {
            let is_selected = i == app.team_list.selected;
            let name_style = if is_selected {
                Styles::selected()
            } else {
                Style::default().fg(c.fg)
            };
            let slug_style = if is_selected {
                Style::default().fg(c.selected_fg).bg(c.selected_bg)
            } else {
                Style::default().fg(c.muted)
            };

            ListItem::new(Line::from(vec![
                Span::raw("  "),
                Span::styled(team.name.as_str(), name_style),
                Span::raw(" "),
                Span::styled(format!("[{}]", team.slug), slug_style),
                Span::styled(
                    format!("  updated {}", team.updated_at.format("%Y-%m-%d %H:%M")),
                    Style::default().fg(c.muted).add_modifier(Modifier::ITALIC),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default())
        .highlight_style(Style::default());

    let mut list_state = ListState::default();
    list_state.select(Some(app.team_list.selected));

    frame.render_stateful_widget(list, area, &mut list_state);
}
