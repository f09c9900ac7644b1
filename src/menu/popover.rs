//! Hover preview ownership for folder menus
//!
//! A folder menu owns at most one hover popover. Every change of owner goes
//! through `set_hover_popover`, which tears the old popover down before the
//! new one becomes visible and refuses popovers the menu can no longer show.

use super::{MenuId, MenuTree, TimerKind};
use crate::host::{Host, HoverPopover};
use crate::log_debug;
use crate::logic::debounce::SHOW_POPOVER_DELAY;
use crate::logic::file::folder_note;
use crate::logic::layout::popover_position;

impl MenuTree {
    /// A menu may only show a preview while it is visible and has no child
    pub fn can_show_popover(&self, id: MenuId) -> bool {
        self.menus
            .get(&id)
            .is_some_and(|m| m.visible && m.child.is_none())
    }

    pub fn hover_popover(&self, id: MenuId) -> Option<&HoverPopover> {
        self.folder(id).and_then(|f| f.popover.as_ref())
    }

    /// Replace a folder menu's popover
    pub fn set_hover_popover(&mut self, host: &mut dyn Host, id: MenuId, popover: Option<HoverPopover>) {
        let auto = self.auto_preview.get();
        let Some(folder) = self.folder_mut(id) else {
            if let Some(popover) = popover {
                host.hide_popover(popover);
            }
            return;
        };

        let old = folder.popover.take();
        if let Some(mut old) = old {
            if popover.as_ref().map(|p| p.id) != Some(old.id) {
                if old.pinned && !auto {
                    log_debug(&format!("Releasing pinned preview of {}", old.path));
                    host.release_popover(old);
                } else {
                    old.pinned = false;
                    host.hide_popover(old);
                }
            }
        }

        let Some(mut popover) = popover else {
            return;
        };
        if !self.can_show_popover(id) {
            host.hide_popover(popover);
            return;
        }

        if auto {
            popover.pinned = false;
            popover.auto = true;
            popover.tracks_hover = false;
        }
        if (auto || popover.position.is_none()) && !self.frame_tasks.contains(&id) {
            self.frame_tasks.push(id);
        }
        log_debug(&format!("{} now previews {}", id, popover.path));
        if let Some(folder) = self.folder_mut(id) {
            folder.popover = Some(popover);
        }
    }

    pub fn hide_popover(&mut self, host: &mut dyn Host, id: MenuId) {
        if self.folder(id).is_some_and(|f| f.popover.is_some()) {
            self.set_hover_popover(host, id, None);
        }
    }

    /// Debounced: preview the current row shortly after the selection settles
    pub fn show_popover(&mut self, id: MenuId) {
        self.timers
            .schedule((id, TimerKind::ShowPopover), self.now, SHOW_POPOVER_DELAY);
    }

    pub(super) fn fire_show_popover(&mut self, host: &mut dyn Host, id: MenuId) {
        self.hide_popover(host, id);
        if self.auto_preview.get() {
            self.maybe_hover(host, id);
        }
    }

    /// Ask the host for a preview of the current row, if it has one
    ///
    /// Files preview themselves; folders preview their folder note.
    pub(super) fn maybe_hover(&mut self, host: &mut dyn Host, id: MenuId) {
        if !self.can_show_popover(id) {
            return;
        }
        let Some(entry) = self.current_entry(id) else {
            return;
        };
        let path = if entry.is_folder() {
            folder_note(&*host, &entry).map(|note| note.path)
        } else if host.can_open(&entry) {
            Some(entry.path)
        } else {
            None
        };

        if let Some(popover) = path.and_then(|p| host.request_hover_preview(&p)) {
            self.set_hover_popover(host, id, Some(popover));
        }
    }

    /// Flip auto-preview for every menu
    pub fn toggle_preview(&mut self, host: &mut dyn Host, id: MenuId) -> bool {
        if self.auto_preview.toggle() {
            self.show_popover(id);
        } else {
            self.hide_popover(host, id);
        }
        true
    }

    /// Place the popover beside its menu, centred on the selected row
    pub(super) fn position_popover(&mut self, host: &mut dyn Host, id: MenuId) {
        let viewport = host.viewport();
        let Some(menu) = self.menus.get(&id) else {
            return;
        };
        let menu_rect = menu.rect;
        let row = menu.selected.and_then(|i| self.item_rect(id, i));
        if let Some(popover) = self.folder_mut(id).and_then(|f| f.popover.as_mut()) {
            popover.position = Some(popover_position(menu_rect, row, popover.size, viewport));
        }
    }

    /// The host finished loading a preview; record how tall its content is
    pub fn popover_loaded(&mut self, path: &str, content_height: i32) {
        for menu in self.menus.values_mut() {
            if let super::MenuKind::Folder(folder) = &mut menu.kind {
                if let Some(popover) = folder.popover.as_mut().filter(|p| p.path == path) {
                    popover.scroll.content_height = content_height;
                }
            }
        }
    }
}
