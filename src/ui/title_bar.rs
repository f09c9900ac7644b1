use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use quick_explorer::explorer::CRUMB_SEPARATOR;
use quick_explorer::{Explorer, WindowId};

/// Window tabs (only with more than one window) followed by the breadcrumbs
pub fn render_title_bar(f: &mut Frame, area: Rect, explorer: Option<&Explorer>, windows: &[WindowId], current: WindowId) {
    let mut spans = Vec::new();
    if windows.len() > 1 {
        for (i, &window) in windows.iter().enumerate() {
            let style = if window == current {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::styled(format!("[{}]", i + 1), style));
            spans.push(Span::raw(" "));
        }
        spans.push(Span::raw(" "));
    }

    if let Some(explorer) = explorer {
        let active = explorer.active_crumbs();
        let last = explorer.crumbs().len().saturating_sub(1);
        for (i, crumb) in explorer.crumbs().iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(CRUMB_SEPARATOR, Style::default().fg(Color::DarkGray)));
            }
            let mut style = if crumb.is_folder {
                Style::default().fg(Color::Blue)
            } else {
                Style::default().fg(Color::White)
            };
            if i == last {
                style = style.add_modifier(Modifier::BOLD);
            }
            if active.contains(&i) {
                style = style.bg(Color::DarkGray).add_modifier(Modifier::UNDERLINED);
            }
            spans.push(Span::styled(crumb.title.clone(), style));
        }
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
