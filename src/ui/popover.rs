use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use quick_explorer::logic::path::name_of;
use quick_explorer::{HoverPopover, MenuTree};

use super::to_area;
use crate::app::host::TerminalHost;

/// Draw the hover previews owned by menus, then the floating ones
pub fn render_popovers(f: &mut Frame, area: Rect, tree: &MenuTree, host: &TerminalHost) {
    for id in tree.open_menus() {
        if let Some(popover) = tree.hover_popover(id) {
            render_popover(f, area, popover, host);
        }
    }
    for popover in &host.floating {
        render_popover(f, area, popover, host);
    }
}

fn render_popover(f: &mut Frame, area: Rect, popover: &HoverPopover, host: &TerminalHost) {
    let Some(rect) = popover.rect() else {
        return;
    };
    let popover_area = to_area(rect, area);
    if popover_area.width < 3 || popover_area.height < 3 {
        return;
    }

    let title = if popover.pinned {
        format!(" 📌 {} ", name_of(&popover.path))
    } else {
        format!(" {} ", name_of(&popover.path))
    };
    let lines: Vec<Line> = match host.preview_lines(popover.id) {
        Some(text) => text
            .iter()
            .skip(popover.scroll.top.max(0) as usize)
            .map(|l| Line::raw(l.clone()))
            .collect(),
        None => vec![Line::styled("Loading...", Style::default().fg(Color::DarkGray))],
    };

    let preview = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popover_area);
    f.render_widget(preview, popover_area);
}
