//! Window switching
//!
//! Windows are numbered from 1 and shown as tabs at the left of the title
//! bar once there is more than one.

use quick_explorer::log_debug;
use quick_explorer::WindowId;

use super::App;

/// Columns taken by one tab: `[N]` plus a space
const TAB_WIDTH: i32 = 4;

/// Width of the tab strip for these windows (none for a single window)
pub fn tab_strip_width(windows: &[WindowId]) -> i32 {
    if windows.len() < 2 {
        0
    } else {
        windows.len() as i32 * TAB_WIDTH + 1
    }
}

impl App {
    pub fn new_window(&mut self) {
        let next = self.windows.windows().last().map_or(1, |last| last + 1);
        self.switch_to(next);
        log_debug(&format!("Opened window {}", next));
    }

    /// Make `window` current, creating its explorer if it is new
    pub fn switch_to(&mut self, window: WindowId) {
        if window == self.window && self.windows.get(window).is_some() {
            return;
        }
        self.window = window;
        self.with_explorer(|_, _| ());
    }

    /// Switch to the `n`th open window (1-based), if there is one
    pub fn switch_to_nth(&mut self, n: usize) {
        if let Some(window) = n.checked_sub(1).and_then(|i| self.windows.windows().get(i).copied()) {
            self.switch_to(window);
        }
    }

    /// Close the current window; the last one can't be closed
    pub fn close_window(&mut self) {
        let windows = self.windows.windows();
        if windows.len() < 2 {
            return;
        }
        let closing = self.window;
        self.windows.window_closed(closing, &mut self.host);
        self.window = windows
            .iter()
            .copied()
            .filter(|&w| w != closing)
            .find(|&w| w > closing)
            .or_else(|| windows.iter().copied().filter(|&w| w != closing).last())
            .unwrap_or(1);
        self.relayout_bars();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_strip_hidden_for_one_window() {
        assert_eq!(tab_strip_width(&[]), 0);
        assert_eq!(tab_strip_width(&[1]), 0);
        assert_eq!(tab_strip_width(&[1, 2]), 9);
    }

    #[test]
    fn test_switch_to_nth_window() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.md"), "# a\n").unwrap();
        let config = crate::config::Config::default();
        let vault = dir.path().to_string_lossy().to_string();
        let mut app = App::new(&config, &vault, quick_explorer::logic::layout::Size::new(80, 24)).unwrap();

        app.new_window();
        app.new_window();
        assert_eq!(app.windows.windows(), vec![1, 2, 3]);
        assert_eq!(app.window, 3);

        app.switch_to_nth(2);
        assert_eq!(app.window, 2);

        // Out of range does nothing
        app.switch_to_nth(0);
        app.switch_to_nth(7);
        assert_eq!(app.window, 2);

        app.close_window();
        assert_eq!(app.window, 3);
        assert_eq!(app.windows.windows(), vec![1, 3]);
    }
}
