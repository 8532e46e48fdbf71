//! 主布局渲染

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use team_settings_core::types::RemovalState;

use crate::model::{App, Page};

use super::components;
use super::pages;
use super::theme::colors;

/// 渲染主布局
pub fn render(app: &App, frame: &mut Frame) {
    let size = frame.area();

    // 三层布局：标题栏 + 主内容区 + 状态栏
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // 标题栏
            Constraint::Min(1),    // 主内容区
            Constraint::Length(1), // 状态栏
        ])
        .split(size);

    render_title_bar(app, frame, main_layout[0]);
    render_page_content(app, frame, main_layout[1]);
    components::statusbar::render(app, frame, main_layout[2]);

    // 弹窗在最上层
    components::modal::render(app, frame);
}

/// 渲染标题栏（显示当前地址）
fn render_title_bar(app: &App, frame: &mut Frame, area: Rect) {
    let c = colors();
    let address = match app.current_page {
        Page::TeamList => app.backend.routes().list_address(&app.team_list.org_id),
        Page::TeamSettings => app.team_settings.address.clone(),
    };
    let title = Paragraph::new(format!(
        " Team Settings v{}  {address}",
        env!("CARGO_PKG_VERSION")
    ))
    .style(Style::default().bg(c.highlight).fg(c.selected_fg));
    frame.render_widget(title, area);
}

/// 根据当前页面渲染内容
fn render_page_content(app: &App, frame: &mut Frame, area: Rect) {
    let c = colors();

    let page_title = match app.current_page {
        Page::TeamList => format!("Teams of {}", app.team_list.org_id),
        Page::TeamSettings => app
            .team_settings
            .view
            .as_ref()
            .map_or_else(|| "Loading...".to_string(), |v| v.render().title),
    };

    // 确认弹窗打开时内容区失去焦点
    let modal_open = app.current_page == Page::TeamSettings
        && app
            .team_settings
            .view
            .as_ref()
            .is_some_and(|v| v.removal_state() != RemovalState::Idle);
    let border_style = if modal_open {
        Style::default().fg(c.border)
    } else {
        Style::default().fg(c.border_focused)
    };

    let block = Block::default()
        .title(format!(" {page_title} "))
        .title_style(Style::default().fg(c.fg).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(border_style);

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    match app.current_page {
        Page::TeamList => pages::team_list::render(app, frame, inner_area),
        Page::TeamSettings => pages::team_settings::render(app, frame, inner_area),
    }
}
