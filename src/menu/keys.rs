//! Key bindings for popup menus
//!
//! Only the front menu (deepest child of the newest chain) sees keys. Every
//! key is consumed while a menu is open, so nothing leaks to the host's
//! own bindings.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::{MenuId, MenuTree};
use crate::host::Host;

/// The platform "Mod" key: Ctrl, or Cmd where the terminal reports it
pub fn is_mod(modifiers: KeyModifiers) -> bool {
    modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER)
}

/// Printable character that may extend the type-ahead buffer
fn type_ahead_char(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(c) if key.modifiers.difference(KeyModifiers::SHIFT).is_empty() && !c.is_control() => Some(c),
        _ => None,
    }
}

impl MenuTree {
    /// Feed a key to the front menu
    ///
    /// # Returns
    /// `true` if a menu was open and took the key
    pub fn handle_key(&mut self, host: &mut dyn Host, key: KeyEvent, now: Instant) -> bool {
        self.set_now(now);
        let Some(id) = self.front_menu() else {
            return false;
        };
        if key.kind == KeyEventKind::Release {
            return true;
        }

        let is_folder = self.menus.get(&id).is_some_and(|m| m.is_folder());
        if is_folder && self.folder_key(host, id, &key) {
            return true;
        }
        self.base_key(host, id, &key)
    }

    fn base_key(&mut self, host: &mut dyn Host, id: MenuId, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Up => self.on_arrow_up(host, id),
            KeyCode::Down => self.on_arrow_down(host, id),
            KeyCode::Home => self.on_home(host, id),
            KeyCode::End => self.on_end(host, id),
            KeyCode::Enter => self.on_enter(host, id),
            KeyCode::Esc => self.on_escape(host, id),
            KeyCode::Left => self.on_arrow_left(host, id),
            KeyCode::Right => self.on_arrow_right(host, id),
            _ => match type_ahead_char(key) {
                Some(c) => self.on_key_down(host, id, c),
                None => true,
            },
        }
    }

    /// Folder-only bindings; `false` falls through to the base bindings
    fn folder_key(&mut self, host: &mut dyn Host, id: MenuId, key: &KeyEvent) -> bool {
        let mods = key.modifiers;
        match key.code {
            KeyCode::Tab => self.toggle_preview(host, id),
            KeyCode::Enter if is_mod(mods) || mods.contains(KeyModifiers::ALT) => {
                self.context_for_selection(host, id)
            }
            KeyCode::Char('\\') if mods.is_empty() => self.context_for_selection(host, id),
            KeyCode::Menu => self.context_for_selection(host, id),
            KeyCode::F(2) if mods.contains(KeyModifiers::SHIFT) => self.do_move(host, id),
            KeyCode::F(2) => self.do_rename(host, id),
            KeyCode::PageUp => self.do_scroll(host, id, true, false),
            KeyCode::PageDown => self.do_scroll(host, id, false, false),
            KeyCode::Home if is_mod(mods) => self.do_scroll(host, id, true, true),
            KeyCode::End if is_mod(mods) => self.do_scroll(host, id, false, true),
            _ => false,
        }
    }

    fn context_for_selection(&mut self, host: &mut dyn Host, id: MenuId) -> bool {
        if let Some(index) = self.menus.get(&id).and_then(|m| m.selected) {
            self.open_context_menu(host, id, index, None);
        }
        true
    }
}
