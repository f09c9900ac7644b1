//! Mouse Input Handler

use std::time::Instant;

use anyhow::Result;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use quick_explorer::logic::layout::Point;
use quick_explorer::Explorer;

use crate::App;

pub fn handle_mouse(app: &mut App, mouse: MouseEvent) -> Result<()> {
    let point = Point::new(mouse.column as i32, mouse.row as i32);
    let modifiers = mouse.modifiers;
    let now = Instant::now();

    match mouse.kind {
        MouseEventKind::Down(button @ (MouseButton::Left | MouseButton::Right)) => {
            let secondary = button == MouseButton::Right;
            if !secondary {
                app.pressed = Some(point);
            }
            let inside = app.with_explorer(|explorer, host| {
                explorer.on_mouse_down(host, point, modifiers, secondary, now)
            });
            if !inside && !app.host.floating.iter().any(|p| p.rect().is_some_and(|r| r.contains(point))) {
                app.host.close_floating();
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if let Some(origin) = app.pressed.take() {
                app.with_explorer(|explorer, host| explorer.on_drag_start(host, origin));
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            app.pressed = None;
            if app.host.dragging.is_some() {
                let target = app.explorer().and_then(|explorer| drop_target(explorer, point));
                match target {
                    Some(folder) => {
                        if let Err(e) = app.host.drop_on(&folder) {
                            app.notice_error(&e);
                        }
                    }
                    None => app.host.dragging = None,
                }
            }
        }
        MouseEventKind::Moved => {
            app.with_explorer(|explorer, host| explorer.on_mouse_move(host, point, modifiers, now));
        }
        MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
            let up = mouse.kind == MouseEventKind::ScrollUp;
            app.with_explorer(|explorer, host| explorer.on_wheel(host, point, up, now));
        }
        _ => {}
    }
    Ok(())
}

/// Folder under `point`: a folder row in an open menu, or a folder crumb
fn drop_target(explorer: &Explorer, point: Point) -> Option<String> {
    if let Some((id, index)) = explorer.tree.item_at(point) {
        return explorer
            .tree
            .menu(id)
            .and_then(|menu| menu.items.get(index))
            .and_then(|item| item.entry())
            .filter(|entry| entry.is_folder())
            .map(|entry| entry.path.clone());
    }
    explorer
        .crumb_at(point)
        .and_then(|index| explorer.crumbs().get(index))
        .filter(|crumb| crumb.is_folder)
        .map(|crumb| crumb.path.clone())
}
