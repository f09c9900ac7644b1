//! Keyboard Input Handler

use std::time::Instant;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use quick_explorer::commands::{BROWSE_CURRENT, BROWSE_VAULT};
use quick_explorer::host::Workspace;

use crate::app::host::Dialog;
use crate::App;

/// Handle keyboard input
///
/// An open dialog takes every key. Otherwise the front menu gets first
/// refusal, and what it doesn't consume goes to the global bindings.
pub fn handle_key(app: &mut App, key: KeyEvent) -> Result<()> {
    if app.host.dialog.is_some() {
        if key.kind != KeyEventKind::Release {
            handle_dialog_key(app, key);
        }
        return Ok(());
    }

    let now = Instant::now();
    if app.with_explorer(|explorer, host| explorer.handle_key(host, key, now)) {
        return Ok(());
    }
    if key.kind == KeyEventKind::Release {
        return Ok(());
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    match key.code {
        KeyCode::Char('c') if ctrl => app.should_quit = true,
        KeyCode::Char('n') if ctrl => app.new_window(),
        KeyCode::Char('w') if ctrl => app.close_window(),
        KeyCode::Char(digit @ '1'..='9') if alt => {
            app.switch_to_nth(digit as usize - '0' as usize);
        }
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('v') => {
            app.run_command(BROWSE_VAULT);
        }
        KeyCode::Char('c') => {
            app.run_command(BROWSE_CURRENT);
        }
        KeyCode::Char('r') => reveal_active(app),
        KeyCode::Esc => {
            app.host.close_floating();
            app.host.pane.editing = false;
        }
        _ => {}
    }
    Ok(())
}

/// Open menus down to the active file
fn reveal_active(app: &mut App) {
    let Some(active) = app.host.active_file() else {
        app.run_command(BROWSE_VAULT);
        return;
    };
    let reached = app.with_explorer(|explorer, host| explorer.browse_file(host, &active));
    if reached.is_none() {
        app.host.notice(&format!("Error: Could not browse to {}", active));
    }
}

fn handle_dialog_key(app: &mut App, key: KeyEvent) {
    let Some(dialog) = app.host.dialog.as_mut() else {
        return;
    };
    let confirmed = match dialog {
        Dialog::ConfirmDelete { .. } => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => true,
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.host.dialog = None;
                return;
            }
            _ => return,
        },
        Dialog::Rename { input, .. } | Dialog::Move { input, .. } => match key.code {
            KeyCode::Enter => true,
            KeyCode::Esc => {
                app.host.dialog = None;
                return;
            }
            KeyCode::Backspace => {
                input.pop();
                return;
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                input.push(c);
                return;
            }
            _ => return,
        },
    };

    if confirmed {
        if let Err(e) = app.host.confirm_dialog() {
            app.notice_error(&e);
        }
    }
}
