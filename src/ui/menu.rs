use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use quick_explorer::menu::{Menu, MenuItem};
use quick_explorer::MenuTree;

use super::icons::IconRenderer;
use super::to_area;

/// Draw every open menu, parents before their children
pub fn render_menus(f: &mut Frame, area: Rect, tree: &MenuTree, icons: &IconRenderer) {
    for id in tree.open_menus() {
        if let Some(menu) = tree.menu(id).filter(|m| m.visible) {
            render_menu(f, area, menu, icons);
        }
    }
}

fn render_menu(f: &mut Frame, area: Rect, menu: &Menu, icons: &IconRenderer) {
    let menu_area = to_area(menu.rect, area);
    if menu_area.width < 3 || menu_area.height < 3 {
        return;
    }

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    if let Some(folder) = menu.folder() {
        if !menu.match_buffer.is_empty() {
            block = block.title_bottom(format!(" {} ", menu.match_buffer));
        } else if !folder.folder.is_root() {
            block = block.title(format!(" {} ", folder.folder.name()));
        }
    }

    let inner_width = menu_area.width.saturating_sub(2) as usize;
    let first = (menu.scroll_top / menu.metrics.row_height.max(1)).max(0) as usize;
    let rows = menu_area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = menu
        .items
        .iter()
        .skip(first)
        .take(rows)
        .map(|item| item_line(item, inner_width, icons))
        .collect();

    f.render_widget(Clear, menu_area);
    f.render_widget(Paragraph::new(lines).block(block), menu_area);
}

fn item_line(item: &MenuItem, width: usize, icons: &IconRenderer) -> Line<'static> {
    if item.is_separator() {
        return Line::styled("─".repeat(width), Style::default().fg(Color::DarkGray));
    }

    let mut style = Style::default();
    if item.disabled {
        style = style.fg(Color::DarkGray);
    }
    if item.active {
        style = style.add_modifier(Modifier::BOLD).bg(Color::DarkGray);
    }
    if item.selected {
        style = style.add_modifier(Modifier::REVERSED);
    }

    let badge = item.badge.clone().unwrap_or_default();
    let used = 2 + item.title.width() + badge.width();
    let gap = width.saturating_sub(used).max(1);

    Line::from(vec![
        icons.icon(&item.icon),
        Span::styled(" ", style),
        Span::styled(item.title.clone(), style),
        Span::styled(" ".repeat(gap), style),
        Span::styled(badge, style.fg(Color::DarkGray)),
    ])
}
