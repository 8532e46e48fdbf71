//! 团队设置页更新

use serde_json::Value;
use team_settings_core::types::FieldKind;
use team_settings_core::{CoreResult, TeamSettingsView};

use crate::backend::StatusLevel;
use crate::message::EditorMessage;
use crate::model::{App, StatusLine};

pub fn update(app: &mut App, msg: EditorMessage) {
    if let Err(e) = apply(app, msg) {
        if e.is_expected() {
            log::warn!("Editor update rejected: {e}");
        } else {
            log::error!("Editor update failed: {e}");
        }
        app.set_status(StatusLevel::Error, e.to_string());
    }
}

/// 让焦点字段失焦，有修改时提交保存
pub fn blur_focused(app: &mut App) {
    let Some(focused) = app.team_settings.focused_field() else {
        return;
    };
    let Some(view) = app.team_settings.view.as_mut() else {
        return;
    };
    match view.begin_blur(&focused) {
        Ok(Some(request)) => app.backend.submit_save(request),
        Ok(None) => {}
        Err(e) => log::error!("Failed to save {focused}: {e}"),
    }
}

fn apply(app: &mut App, msg: EditorMessage) -> CoreResult<()> {
    let App {
        team_settings,
        backend,
        status,
        ..
    } = app;
    let Some(focused) = team_settings.focused_field() else {
        return Ok(());
    };
    let Some(view) = team_settings.view.as_mut() else {
        return Ok(());
    };

    match msg {
        EditorMessage::Input(c) => {
            let next = if is_boolean(view, &focused)? {
                // 布尔字段只用空格切换
                if c != ' ' {
                    return Ok(());
                }
                Value::Bool(!view.current_value(&focused)?.as_bool().unwrap_or(false))
            } else {
                let mut text = text_of(view.current_value(&focused)?);
                text.push(c);
                Value::String(text)
            };
            view.on_field_change(&focused, next)?;
        }

        EditorMessage::Backspace => {
            if is_boolean(view, &focused)? {
                return Ok(());
            }
            let mut text = text_of(view.current_value(&focused)?);
            if text.pop().is_some() {
                view.on_field_change(&focused, Value::String(text))?;
            }
        }

        EditorMessage::NextField | EditorMessage::PrevField => {
            if let Some(request) = view.begin_blur(&focused)? {
                backend.submit_save(request);
            }
            if msg == EditorMessage::NextField {
                team_settings.focus_next();
            } else {
                team_settings.focus_previous();
            }
        }

        EditorMessage::Undo => match view.begin_undo(&focused)? {
            Some(request) => backend.submit_save(request),
            None => *status = line(StatusLevel::Info, "Nothing to undo"),
        },

        EditorMessage::TriggerRemoval => {
            if !view.is_removal_offered() {
                *status = line(
                    StatusLevel::Error,
                    "You do not have permission to remove this team",
                );
            } else {
                view.trigger_removal();
            }
        }

        EditorMessage::ConfirmRemoval => {
            let request = view.begin_removal()?;
            backend.submit_removal(request);
            *status = line(StatusLevel::Progress, "Removing team...");
        }

        EditorMessage::CancelRemoval => {
            view.cancel_removal();
        }
    }
    Ok(())
}

fn is_boolean(view: &TeamSettingsView, id: &str) -> CoreResult<bool> {
    if view.current_value(id)?.is_boolean() {
        return Ok(true);
    }
    Ok(view
        .render()
        .fields
        .iter()
        .any(|f| f.id == id && f.kind == FieldKind::Boolean))
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn line(level: StatusLevel, text: &str) -> Option<StatusLine> {
    Some(StatusLine {
        level,
        text: text.to_string(),
    })
}
