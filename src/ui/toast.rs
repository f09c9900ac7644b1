use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Render a toast notification near the bottom of the screen
pub fn render_toast(f: &mut Frame, area: Rect, message: &str) {
    let max_width = (area.width as usize).min(80);
    let toast_width = (message.width() + 6).min(max_width) as u16;
    let toast_height = 3;

    let toast_area = Rect {
        x: area.x + area.width.saturating_sub(toast_width) / 2,
        y: area.y + area.height.saturating_sub(toast_height + 2),
        width: toast_width,
        height: toast_height.min(area.height),
    };

    f.render_widget(Clear, toast_area);

    let is_error = message.starts_with("Error:");
    let color = if is_error { Color::Red } else { Color::Green };
    let icon = if is_error { "✗ " } else { "✓ " };

    let line = Line::from(vec![
        Span::styled(icon, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::raw(message.to_string()),
    ]);
    let toast = Paragraph::new(line)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color).add_modifier(Modifier::BOLD)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });

    f.render_widget(toast, toast_area);
}
