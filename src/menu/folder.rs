//! Folder menus: one menu per folder, cascading into subfolders

use super::{
    CascadeTarget, Click, FolderMenu, ItemKind, ItemOutcome, MenuId, MenuItem, MenuKind, MenuTree,
    Parent, TargetRef, TimerKind, TreeRequest,
};
use crate::host::{Entry, Feature, Host, Vault, VaultEvent};
use crate::log_debug;
use crate::logic::breadcrumb::step_toward;
use crate::logic::debounce::REFRESH_FILES_DELAY;
use crate::logic::file::{icon_for, listing, supported_file_count};
use crate::logic::navigation::{next_selectable, prev_selectable};
use crate::logic::path;

/// Build the row for one file or folder
pub fn file_item<V: Vault + ?Sized>(vault: &V, entry: &Entry) -> MenuItem {
    let mut item = MenuItem::new(entry.basename(), icon_for(entry), ItemKind::Entry(entry.clone()));
    item.draggable = true;
    item.badge = if entry.is_folder() {
        Some(supported_file_count(vault, entry).to_string())
    } else {
        match entry.extension().as_str() {
            "md" | "" => None,
            ext => Some(ext.to_uppercase()),
        }
    };
    item
}

enum ScrollAction {
    Done,
    SelectPrev,
    SelectNext,
}

impl MenuTree {
    /// Create a folder menu listing `folder`, selecting `selected_file` if present
    pub fn open_folder_menu(
        &mut self,
        host: &mut dyn Host,
        parent: Parent,
        folder: Entry,
        selected_file: Option<String>,
        crumb: Option<usize>,
    ) -> MenuId {
        let kind = MenuKind::Folder(FolderMenu {
            folder,
            selected_file: selected_file.clone(),
            crumb,
            popover: None,
        });
        let id = self.create_menu(host, parent, kind);
        self.load_files(host, id, selected_file.as_deref());
        id
    }

    /// Rebuild a folder menu's rows: folder note, subfolders, files
    pub fn load_files(&mut self, host: &mut dyn Host, id: MenuId, selected: Option<&str>) {
        let Some(folder) = self.folder(id).map(|f| f.folder.clone()) else {
            return;
        };
        let listing = listing(&*host, &folder);

        let groups = [listing.note.into_iter().collect::<Vec<_>>(), listing.folders, listing.files];
        let mut items = Vec::new();
        for group in groups.iter().filter(|g| !g.is_empty()) {
            if !items.is_empty() {
                items.push(MenuItem::separator());
            }
            items.extend(group.iter().map(|entry| file_item(&*host, entry)));
        }

        let Some(menu) = self.menus.get_mut(&id) else {
            return;
        };
        menu.items = items;
        menu.mark_selected(None);
        let index = selected
            .and_then(|p| self.item_for_path(id, p))
            .or_else(|| self.menus.get(&id).and_then(|m| next_selectable(&m.selectable(), None)));

        if self.menus.get(&id).is_some_and(|m| m.visible) {
            self.relayout(&*host, id);
        }
        self.reanchor_child(host, id);
        self.select(host, id, index, true);
        log_debug(&format!("{} listed {}", id, folder.path));
    }

    pub fn item_for_path(&self, id: MenuId, path: &str) -> Option<usize> {
        self.menus
            .get(&id)?
            .items
            .iter()
            .position(|item| item.entry().is_some_and(|e| e.path == path))
    }

    /// Entry of the selected row
    pub fn current_entry(&self, id: MenuId) -> Option<Entry> {
        self.menus.get(&id)?.selected_item()?.entry().cloned()
    }

    /// Open a file, or descend into a folder, from row `index`
    pub fn on_click_file(
        &mut self,
        host: &mut dyn Host,
        id: MenuId,
        entry: &Entry,
        index: usize,
        click: Option<Click>,
    ) -> ItemOutcome {
        self.hide_popover(host, id);
        self.select(host, id, Some(index), true);

        if !entry.is_folder() {
            if !host.can_open(entry) {
                host.notice(&format!(
                    "Unsupported file type: {}. Use \"Open in default app\" to open it.",
                    entry.name()
                ));
                return ItemOutcome::KeepOpen;
            }
            let new_leaf = click.is_some_and(|c| super::is_mod(c.modifiers));
            if let Err(e) = host.open_file(&entry.path, new_leaf) {
                log_debug(&format!("Failed to open {}: {}", entry.path, e));
                host.notice(&format!("Error: {}", e));
                return ItemOutcome::KeepOpen;
            }
            self.hide_chain(host, id);
            return ItemOutcome::Close;
        }

        let Some(folder) = self.folder(id) else {
            return ItemOutcome::KeepOpen;
        };
        if folder.selected_file.as_deref() == Some(entry.path.as_str()) {
            if let Some(crumb) = folder.crumb {
                self.requests.push(TreeRequest::OpenCrumb { crumb, step: 1 });
                return ItemOutcome::KeepOpen;
            }
        }

        let Some(rect) = self.item_rect(id, index) else {
            return ItemOutcome::KeepOpen;
        };
        let selected = host
            .active_file()
            .and_then(|active| step_toward(&entry.path, &active));
        let child = self.open_folder_menu(host, Parent::Menu(id), entry.clone(), selected, None);
        let target = CascadeTarget {
            rect,
            anchor: Some(TargetRef::Item(id, index)),
        };
        self.cascade(host, child, target, click.map(|c| c.point), None);
        ItemOutcome::KeepOpen
    }

    /// Descend into a folder, or focus the preview of a file
    pub(super) fn folder_arrow_right(&mut self, host: &mut dyn Host, id: MenuId) {
        let Some(index) = self.menus.get(&id).and_then(|m| m.selected) else {
            return;
        };
        let Some(entry) = self.current_entry(id) else {
            return;
        };
        if entry.is_folder() {
            self.on_click_file(host, id, &entry, index, None);
            return;
        }

        let editable = self.hover_popover(id).is_some_and(|p| p.has_editor);
        let popover = if editable {
            self.folder_mut(id).and_then(|f| f.popover.take())
        } else {
            None
        };
        if let Some(mut popover) = popover {
            popover.pinned = true;
            if let Err(e) = host.activate_popover(popover, true) {
                log_debug(&format!("Failed to activate preview of {}: {}", entry.path, e));
                host.notice(&format!("Error: {}", e));
            }
            self.hide_chain(host, id);
        }
    }

    /// Right click: open a context menu for the row instead of navigating
    pub fn on_item_menu(&mut self, host: &mut dyn Host, id: MenuId, index: usize, click: Click) {
        if self.menus.get(&id).is_some_and(|m| m.is_folder()) {
            self.open_context_menu(host, id, index, Some(click));
        }
    }

    /// Open the file actions for row `index`
    ///
    /// From the keyboard (no click) the first action is pre-selected.
    pub fn open_context_menu(&mut self, host: &mut dyn Host, id: MenuId, index: usize, click: Option<Click>) {
        let Some(entry) = self
            .menus
            .get(&id)
            .and_then(|m| m.items.get(index))
            .and_then(|item| item.entry().cloned())
        else {
            return;
        };
        let Some(rect) = self.item_rect(id, index) else {
            return;
        };
        if self.menus.get(&id).and_then(|m| m.selected) != Some(index) {
            self.select(host, id, Some(index), true);
        }

        let menu = self.create_context_menu(host, Parent::Menu(id), entry);
        let target = CascadeTarget {
            rect,
            anchor: Some(TargetRef::Item(id, index)),
        };
        self.cascade(host, menu, target, click.map(|c| c.point), None);
        if click.is_none() {
            let first = self.menus.get(&menu).and_then(|m| next_selectable(&m.selectable(), None));
            self.select(host, menu, first, true);
        }
    }

    pub fn on_item_drag_start(&mut self, host: &mut dyn Host, id: MenuId, index: usize) {
        let Some(entry) = self
            .menus
            .get(&id)
            .and_then(|m| m.items.get(index))
            .filter(|item| item.draggable)
            .and_then(|item| item.entry().cloned())
        else {
            return;
        };
        host.begin_drag(&entry);
        self.hide_chain(host, id);
    }

    /// Page the preview, or move the selection once the preview runs out
    ///
    /// Without a preview, the first press turns auto-preview on.
    pub fn do_scroll(&mut self, host: &mut dyn Host, id: MenuId, up: bool, to_end: bool) -> bool {
        let auto = self.auto_preview.get();
        let shown = self
            .folder_mut(id)
            .and_then(|f| f.popover.as_mut())
            .filter(|p| p.position.is_some());

        let action = match shown {
            Some(popover) => {
                let scroll = &mut popover.scroll;
                let page = scroll.page_height.max(1);
                if to_end {
                    scroll.top = if up { 0 } else { scroll.max_top() };
                    ScrollAction::Done
                } else if up {
                    if scroll.top <= 0 {
                        ScrollAction::SelectPrev
                    } else {
                        scroll.top = (scroll.top - page).max(0);
                        ScrollAction::Done
                    }
                } else if scroll.top + page >= scroll.content_height {
                    ScrollAction::SelectNext
                } else {
                    scroll.top = (scroll.top + page).min(scroll.max_top());
                    ScrollAction::Done
                }
            }
            None if !auto => {
                self.auto_preview.set(true);
                self.show_popover(id);
                ScrollAction::Done
            }
            None if up => ScrollAction::SelectPrev,
            None => ScrollAction::SelectNext,
        };

        match action {
            ScrollAction::Done => true,
            ScrollAction::SelectPrev => self.on_arrow_up(host, id),
            ScrollAction::SelectNext => self.on_arrow_down(host, id),
        }
    }

    pub fn do_rename(&mut self, host: &mut dyn Host, id: MenuId) -> bool {
        if let Some(entry) = self.current_entry(id) {
            self.hide_chain(host, id);
            host.prompt_for_rename(&entry);
        }
        true
    }

    pub fn do_move(&mut self, host: &mut dyn Host, id: MenuId) -> bool {
        let Some(entry) = self.current_entry(id) else {
            return true;
        };
        if !host.is_feature_enabled(Feature::FileExplorer) {
            host.notice("File explorer core plugin must be enabled to move files or folders");
            return true;
        }
        self.hide_chain(host, id);
        if let Err(e) = host.prompt_for_move(&entry) {
            log_debug(&format!("Move prompt failed for {}: {}", entry.path, e));
            host.notice(&format!("Error: {}", e));
        }
        true
    }

    /// Debounced reload after files appear in this folder
    pub(super) fn refresh_files(&mut self, host: &mut dyn Host, id: MenuId) {
        if !self.menus.get(&id).is_some_and(|m| m.visible) {
            return;
        }
        let current = self.current_entry(id).map(|e| e.path);
        self.load_files(host, id, current.as_deref());
    }

    fn remove_item_for_path(&mut self, host: &mut dyn Host, id: MenuId, path: &str) {
        let Some(index) = self.item_for_path(id, path) else {
            return;
        };
        let Some(menu) = self.menus.get_mut(&id) else {
            return;
        };

        // A group that loses its last row takes one separator with it
        let is_separator = |i: usize| menu.items.get(i).is_some_and(MenuItem::is_separator);
        let mut removed = vec![index];
        let last = index + 1 >= menu.items.len();
        if index > 0 && is_separator(index - 1) && (last || is_separator(index + 1)) {
            removed.push(index - 1);
        } else if index == 0 && is_separator(1) {
            removed.push(1);
        }
        removed.sort_unstable_by(|a, b| b.cmp(a));

        let mut lost_selection = false;
        for &row in &removed {
            menu.items.remove(row);
            match menu.selected {
                Some(selected) if selected > row => menu.selected = Some(selected - 1),
                Some(selected) if selected == row => lost_selection = true,
                _ => {}
            }
        }

        if lost_selection {
            // Settle on the row that slid into place, else the one above it
            let landing = index - removed.iter().filter(|&&row| row < index).count();
            let len = menu.items.len();
            let next = (len > 0).then(|| landing.min(len - 1));
            menu.selected = None;
            let next = next
                .filter(|&i| menu.items[i].is_selectable())
                .or_else(|| prev_selectable(&menu.selectable(), next.map(|i| i + 1)));
            self.select(host, id, next, true);
        }
        if self.menus.get(&id).is_some_and(|m| m.visible) {
            self.relayout(&*host, id);
        }
        self.reanchor_child(host, id);
    }

    /// Point an open child back at the row it was opened from after the rows
    /// changed, or close it when that row is gone
    fn reanchor_child(&mut self, host: &mut dyn Host, id: MenuId) {
        let Some(child) = self.menus.get(&id).and_then(|m| m.child) else {
            return;
        };
        let anchor = self.menus.get(&child).and_then(|c| match (&c.target, &c.kind) {
            (Some(TargetRef::Item(..)), MenuKind::Folder(f)) => Some(f.folder.path.clone()),
            (Some(TargetRef::Item(..)), MenuKind::Context(context)) => {
                Some(context.target.path.clone())
            }
            _ => None,
        });
        let Some(anchor) = anchor else {
            return;
        };

        let index = self.item_for_path(id, &anchor);
        if let Some(menu) = self.menus.get_mut(&id) {
            for (i, item) in menu.items.iter_mut().enumerate() {
                item.active = Some(i) == index;
            }
        }
        match index {
            Some(index) => {
                if let Some(menu) = self.menus.get_mut(&child) {
                    menu.target = Some(TargetRef::Item(id, index));
                }
            }
            None => {
                log_debug(&format!("{} lost the row of {}", id, anchor));
                self.hide(host, child);
            }
        }
    }

    pub(super) fn folder_vault_event(&mut self, host: &mut dyn Host, id: MenuId, event: &VaultEvent) {
        let Some(folder) = self.folder(id).map(|f| f.folder.path.clone()) else {
            return;
        };

        match event {
            VaultEvent::Create(created) => {
                if path::is_child_of(created, &folder) {
                    self.timers
                        .schedule((id, TimerKind::RefreshFiles), self.now, REFRESH_FILES_DELAY);
                }
            }
            VaultEvent::Rename { path: new_path, old_path } => {
                if let Some(rebased) = path::rebase(&folder, old_path, new_path) {
                    log_debug(&format!("{} follows rename of {} to {}", id, old_path, new_path));
                    if let Some(f) = self.folder_mut(id) {
                        f.folder.path = rebased.clone();
                        f.selected_file = f
                            .selected_file
                            .as_deref()
                            .and_then(|s| path::rebase(s, old_path, new_path));
                    }
                    let current = self
                        .current_entry(id)
                        .and_then(|e| path::rebase(&e.path, old_path, new_path));
                    self.load_files(host, id, current.as_deref());
                } else if path::is_child_of(new_path, &folder) {
                    let current = self.current_entry(id).map(|e| e.path);
                    let selected = if current.as_deref() == Some(old_path.as_str()) {
                        Some(new_path.clone())
                    } else {
                        current
                    };
                    self.load_files(host, id, selected.as_deref());
                } else {
                    self.remove_item_for_path(host, id, old_path);
                }
            }
            VaultEvent::Delete(deleted) => {
                if path::is_within(&folder, deleted) {
                    log_debug(&format!("{} lost its folder {}", id, folder));
                    self.hide(host, id);
                } else {
                    self.remove_item_for_path(host, id, deleted);
                }
            }
        }
    }
}
