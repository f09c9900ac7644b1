use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Bottom line: open file, preview state and the main hotkeys
pub fn render_status_bar(
    f: &mut Frame,
    area: Rect,
    active_file: Option<&str>,
    auto_preview: bool,
    attachment_folder: Option<&str>,
    menus_open: bool,
) {
    let hint = if menus_open {
        "↑↓ select  → open  ← back  Tab preview  \\ actions  F2 rename  Esc close"
    } else {
        "v vault  c current  r reveal  ^N window  q quit"
    };
    let mut spans = vec![
        Span::styled(
            format!(" {} ", active_file.unwrap_or("(no file)")),
            Style::default().fg(Color::Black).bg(Color::Gray),
        ),
        Span::styled(
            format!(" preview: {} ", if auto_preview { "on" } else { "off" }),
            Style::default().fg(Color::Cyan),
        ),
    ];
    if let Some(folder) = attachment_folder {
        spans.push(Span::styled(format!("attachments: {} ", folder), Style::default().fg(Color::Magenta)));
    }
    spans.push(Span::styled(hint, Style::default().fg(Color::DarkGray)));
    let line = Line::from(spans);
    f.render_widget(Paragraph::new(line), area);
}
