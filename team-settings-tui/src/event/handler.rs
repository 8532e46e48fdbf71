//! 事件处理器

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use team_settings_core::types::RemovalState;

use crate::event::keymap::DefaultKeymap;
use crate::message::{AppMessage, EditorMessage, ListMessage};
use crate::model::{App, Page};

/// 轮询事件
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// 处理事件，返回对应的消息
pub fn handle_event(event: Event, app: &App) -> AppMessage {
    match event {
        Event::Key(key_event) => handle_key_event(key_event, app),
        _ => AppMessage::Noop,
    }
}

/// 处理键盘事件
fn handle_key_event(key: KeyEvent, app: &App) -> AppMessage {
    // 只处理 Press 事件，忽略 Release 和 Repeat
    if key.kind != KeyEventKind::Press {
        return AppMessage::Noop;
    }

    if DefaultKeymap::FORCE_QUIT.matches(&key) {
        return AppMessage::Quit;
    }

    match app.current_page {
        Page::TeamList => handle_list_keys(key),
        Page::TeamSettings => handle_settings_keys(key, app),
    }
}

fn handle_list_keys(key: KeyEvent) -> AppMessage {
    if DefaultKeymap::QUIT.matches(&key) {
        AppMessage::Quit
    } else if DefaultKeymap::REFRESH.matches(&key) {
        AppMessage::Refresh
    } else if DefaultKeymap::NAV_UP.matches(&key) {
        AppMessage::List(ListMessage::SelectPrevious)
    } else if DefaultKeymap::NAV_DOWN.matches(&key) {
        AppMessage::List(ListMessage::SelectNext)
    } else if DefaultKeymap::NAV_CONFIRM.matches(&key) {
        AppMessage::List(ListMessage::Open)
    } else {
        AppMessage::Noop
    }
}

fn handle_settings_keys(key: KeyEvent, app: &App) -> AppMessage {
    let removal = app
        .team_settings
        .view
        .as_ref()
        .map_or(RemovalState::Idle, |v| v.removal_state());

    match removal {
        RemovalState::AwaitingConfirmation => return handle_confirm_keys(key),
        // 移除进行中，只允许强制退出
        RemovalState::Executing => return AppMessage::Noop,
        RemovalState::Idle => {}
    }

    if DefaultKeymap::BACK.matches(&key) {
        return AppMessage::GoBack;
    }
    if DefaultKeymap::ACTION_UNDO.matches(&key) {
        return AppMessage::Editor(EditorMessage::Undo);
    }
    if DefaultKeymap::ACTION_REMOVE.matches(&key) {
        return AppMessage::Editor(EditorMessage::TriggerRemoval);
    }
    if DefaultKeymap::FIELD_NEXT.matches(&key) || DefaultKeymap::NAV_DOWN.matches(&key) {
        return AppMessage::Editor(EditorMessage::NextField);
    }
    // 部分终端上 BackTab 不带 SHIFT 修饰
    if DefaultKeymap::FIELD_PREV.matches(&key)
        || key.code == KeyCode::BackTab
        || DefaultKeymap::NAV_UP.matches(&key)
    {
        return AppMessage::Editor(EditorMessage::PrevField);
    }

    match key.code {
        KeyCode::Backspace => AppMessage::Editor(EditorMessage::Backspace),
        KeyCode::Char(c)
            if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT =>
        {
            AppMessage::Editor(EditorMessage::Input(c))
        }
        _ => AppMessage::Noop,
    }
}

fn handle_confirm_keys(key: KeyEvent) -> AppMessage {
    if DefaultKeymap::CONFIRM_YES.matches(&key) || DefaultKeymap::NAV_CONFIRM.matches(&key) {
        AppMessage::Editor(EditorMessage::ConfirmRemoval)
    } else if DefaultKeymap::CONFIRM_NO.matches(&key) || DefaultKeymap::BACK.matches(&key) {
        AppMessage::Editor(EditorMessage::CancelRemoval)
    } else {
        AppMessage::Noop
    }
}
