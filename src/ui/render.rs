use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::App;

use super::{dialogs, menu, popover, status_bar, title_bar, toast};

/// Main render function - draws one frame
pub fn render(f: &mut Frame, app: &App) {
    let size = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1), Constraint::Length(1)])
        .split(size);

    let explorer = app.explorer();
    title_bar::render_title_bar(f, chunks[0], explorer, &app.windows.windows(), app.window);

    // Open file
    let pane = &app.host.pane;
    let mut title = match (&pane.path, pane.editing) {
        (Some(path), true) => format!(" {} (editing) ", path),
        (Some(path), false) => format!(" {} ", path),
        (None, _) => " Quick Explorer ".to_string(),
    };
    if pane.leaves > 0 {
        title.push_str(&format!("[+{} tabs] ", pane.leaves));
    }
    let body: Vec<Line> = if pane.path.is_some() {
        pane.lines.iter().map(|l| Line::raw(l.clone())).collect()
    } else {
        vec![Line::styled(
            "Click a breadcrumb, or press v to browse the vault",
            Style::default().fg(Color::DarkGray),
        )]
    };
    f.render_widget(
        Paragraph::new(body)
            .block(Block::default().borders(Borders::TOP).title(title))
            .wrap(Wrap { trim: false }),
        chunks[1],
    );

    if let Some(explorer) = explorer {
        menu::render_menus(f, size, &explorer.tree, &app.icon_renderer);
        popover::render_popovers(f, size, &explorer.tree, &app.host);
    }

    status_bar::render_status_bar(
        f,
        chunks[2],
        pane.path.as_deref(),
        app.auto_preview(),
        app.host.attachment_folder.as_deref(),
        explorer.is_some_and(|e| e.tree.has_open_menus()),
    );

    if let Some(dialog) = &app.host.dialog {
        dialogs::render_dialog(f, dialog);
    }

    if let Some((message, _)) = &app.host.toast_message {
        toast::render_toast(f, size, message);
    }
}
