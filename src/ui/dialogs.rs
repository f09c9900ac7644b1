use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::host::Dialog;

/// Render whichever prompt is open
pub fn render_dialog(f: &mut Frame, dialog: &Dialog) {
    match dialog {
        Dialog::Rename { entry, input } => render_input(
            f,
            "Rename",
            &format!("New name for {}:", entry.name()),
            input,
        ),
        Dialog::Move { entry, input } => render_input(
            f,
            "Move",
            &format!("Move {} to folder (blank for vault root):", entry.name()),
            input,
        ),
        Dialog::ConfirmDelete { entry } => render_delete_confirmation(f, entry.name(), entry.is_folder()),
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_input(f: &mut Frame, title: &str, label: &str, input: &str) {
    let text = format!("{}\n\n> {}_\n\n(Enter to confirm, Esc to cancel)", label, input);
    let prompt_area = centered(f.area(), 60, 8);

    let prompt = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string())
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .style(Style::default().fg(Color::White).bg(Color::Black))
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, prompt_area);
    f.render_widget(prompt, prompt_area);
}

/// Render the delete confirmation dialog
fn render_delete_confirmation(f: &mut Frame, display_name: &str, is_dir: bool) {
    let prompt_text = format!(
        "Delete {} from the vault?\n\n\
        {}: {}\n\n\
        WARNING: This action cannot be undone!\n\n\
        Continue? (y/n)",
        if is_dir { "folder" } else { "file" },
        if is_dir { "Folder" } else { "File" },
        display_name
    );
    let prompt_area = centered(f.area(), 50, 11);

    let prompt = Paragraph::new(prompt_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Confirm Delete")
                .border_style(Style::default().fg(Color::Red)),
        )
        .style(Style::default().fg(Color::White).bg(Color::Black))
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, prompt_area);
    f.render_widget(prompt, prompt_area);
}
