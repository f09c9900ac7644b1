// UI module - renders the app with Ratatui
//
// - icons: Icon rendering (emoji and Nerd Fonts) with a color theme
// - render: Orchestrates one frame
// - title_bar: Window tabs and the breadcrumb trail
// - menu: Cascading popup menus
// - popover: Hover previews beside folder menus
// - status_bar: Bottom line with hotkeys and preview state
// - dialogs: Rename, move and delete prompts
// - toast: Brief pop-up messages

pub mod dialogs;
pub mod icons;
pub mod menu;
pub mod popover;
pub mod render;
pub mod status_bar;
pub mod title_bar;
pub mod toast;

pub use render::render;

/// Convert a core rect to a ratatui one, clipped to `area`
pub fn to_area(rect: quick_explorer::logic::layout::Rect, area: ratatui::layout::Rect) -> ratatui::layout::Rect {
    let left = rect.left.clamp(area.x as i32, area.right() as i32);
    let top = rect.top.clamp(area.y as i32, area.bottom() as i32);
    let right = rect.right().clamp(left, area.right() as i32);
    let bottom = rect.bottom().clamp(top, area.bottom() as i32);
    ratatui::layout::Rect {
        x: left as u16,
        y: top as u16,
        width: (right - left) as u16,
        height: (bottom - top) as u16,
    }
}
