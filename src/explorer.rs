//! Breadcrumb Explorer
//!
//! Keeps the breadcrumb trail for the active file and turns clicks and keys
//! on it into folder menu chains. One `Explorer` exists per window.

use std::time::Instant;

use crossterm::event::{KeyEvent, KeyModifiers};

use crate::host::{Entry, Host, VaultEvent};
use crate::log_debug;
use crate::logic::breadcrumb::{crumb_menu_source, crumb_paths, matching_crumbs};
use crate::logic::layout::{CascadeOptions, Point, Rect};
use crate::logic::path;
use crate::menu::{AutoPreview, CascadeTarget, Click, MenuId, MenuTree, Parent, TargetRef, TreeRequest};
use crate::window::PerWindowComponent;

/// Drawn between crumbs
pub const CRUMB_SEPARATOR: &str = " / ";

/// Id under which crumbs register as a hover-link source
pub const HOVER_SOURCE_ID: &str = "quick-explorer";

/// One segment of the trail from the vault root to the active file
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Crumb {
    pub path: String,
    pub title: String,
    pub is_folder: bool,
    pub rect: Rect,
}

#[derive(Debug)]
pub struct Explorer {
    pub tree: MenuTree,
    crumbs: Vec<Crumb>,
    last: Option<Entry>,
    bar: Rect,
}

impl Explorer {
    pub fn new(auto_preview: AutoPreview, bar: Rect) -> Self {
        Self {
            tree: MenuTree::new(auto_preview),
            crumbs: Vec::new(),
            last: None,
            bar,
        }
    }

    pub fn with_options(mut self, options: CascadeOptions) -> Self {
        self.tree = self.tree.with_options(options);
        self
    }

    /// Register with the host and build the first trail
    pub fn load(&mut self, host: &mut dyn Host) {
        host.register_hover_link_source(HOVER_SOURCE_ID, "Quick Explorer");
        let active = host.active_file();
        self.update(host, active.as_deref());
    }

    pub fn crumbs(&self) -> &[Crumb] {
        &self.crumbs
    }

    pub fn bar(&self) -> Rect {
        self.bar
    }

    /// Move the title bar (e.g. after a resize)
    pub fn set_bar(&mut self, host: &dyn Host, bar: Rect) {
        if bar != self.bar {
            self.bar = bar;
            self.layout_crumbs(host);
        }
    }

    /// Rebuild the trail for `file` (the vault root when `None`)
    ///
    /// # Returns
    /// `false` when the trail was already showing `file`
    pub fn update(&mut self, host: &dyn Host, file: Option<&str>) -> bool {
        let path = file.unwrap_or(path::ROOT);
        let entry = host.entry(path).unwrap_or_else(|| {
            if path == path::ROOT {
                Entry::root()
            } else {
                Entry::file(path)
            }
        });
        if self.last.as_ref() == Some(&entry) {
            return false;
        }

        let vault_name = host.vault_name();
        let last_index = crumb_paths(&entry.path).len().saturating_sub(1);
        self.crumbs = crumb_paths(&entry.path)
            .into_iter()
            .enumerate()
            .map(|(i, p)| {
                let is_folder = if i == last_index { entry.is_folder() } else { true };
                let title = if p == path::ROOT {
                    vault_name.clone()
                } else {
                    path::name_of(&p).to_string()
                };
                Crumb {
                    path: p,
                    title,
                    is_folder,
                    rect: Rect::default(),
                }
            })
            .collect();
        self.last = Some(entry);
        self.layout_crumbs(host);
        log_debug(&format!("Breadcrumbs: {:?}", self.crumbs.iter().map(|c| &c.title).collect::<Vec<_>>()));
        true
    }

    fn layout_crumbs(&mut self, host: &dyn Host) {
        let separator = host.measure_text(CRUMB_SEPARATOR);
        let mut x = self.bar.left;
        for crumb in &mut self.crumbs {
            let width = host.measure_text(&crumb.title).max(1);
            crumb.rect = Rect::new(x, self.bar.top, width, self.bar.height.max(1));
            x += width + separator;
        }
    }

    pub fn crumb_at(&self, point: Point) -> Option<usize> {
        self.crumbs.iter().position(|c| c.rect.contains(point))
    }

    /// Crumbs marked by an open menu
    pub fn active_crumbs(&self) -> Vec<usize> {
        self.tree.active_crumbs()
    }

    /// Open the root menu for crumb `index`, closing whatever was open
    pub fn folder_menu(&mut self, host: &mut dyn Host, index: usize, click: Option<Point>) -> Option<MenuId> {
        let sources: Vec<(String, bool)> = self
            .crumbs
            .iter()
            .map(|c| (c.path.clone(), c.is_folder))
            .collect();
        let (folder, selected) = crumb_menu_source(&sources, index)?;
        let rect = self.crumbs.get(index)?.rect;

        self.tree.hide_all(host);
        let folder = folder_entry(&*host, &folder);
        let id = self
            .tree
            .open_folder_menu(host, Parent::Root, folder, selected, Some(index));
        let target = CascadeTarget {
            rect,
            anchor: Some(TargetRef::Crumb(index)),
        };
        self.tree.cascade(host, id, target, click, None);
        Some(id)
    }

    /// Open a menu on the vault root
    pub fn browse_vault(&mut self, host: &mut dyn Host) -> Option<MenuId> {
        self.tree.hide_all(host);
        let selected = self
            .crumbs
            .first()
            .filter(|c| c.path != path::ROOT)
            .map(|c| c.path.clone());
        let width = self.crumbs.first().map_or(1, |c| c.rect.width);
        let rect = Rect::new(self.bar.left, self.bar.top, width, self.bar.height.max(1));

        let id = self
            .tree
            .open_folder_menu(host, Parent::Root, Entry::root(), selected, None);
        let target = CascadeTarget { rect, anchor: None };
        self.tree.cascade(host, id, target, None, None);
        Some(id)
    }

    /// Open the menu for the last crumb
    pub fn browse_current(&mut self, host: &mut dyn Host) -> Option<MenuId> {
        let last = self.crumbs.len().checked_sub(1)?;
        self.folder_menu(host, last, None)
    }

    /// Open menus all the way down to `target`
    ///
    /// Starts from the deepest breadcrumb on the way to `target`, then selects
    /// and descends through each remaining segment.
    ///
    /// # Returns
    /// The deepest menu reached
    pub fn browse_file(&mut self, host: &mut dyn Host, target: &str) -> Option<MenuId> {
        if host.active_file().as_deref() == Some(target) {
            return self.browse_current(host);
        }

        let parts = crumb_paths(target);
        let trail: Vec<String> = self.crumbs.iter().map(|c| c.path.clone()).collect();
        let matched = matching_crumbs(&trail, target);
        // A target that is itself a crumb is shown as a row of its parent's menu
        let start = if matched == parts.len() {
            matched.saturating_sub(1)
        } else {
            matched
        };

        let mut menu = if start == 0 {
            self.browse_vault(host)?
        } else {
            self.folder_menu(host, start - 1, None)?
        };

        for (depth, part) in parts.iter().enumerate().skip(start) {
            let Some(index) = self.tree.item_for_path(menu, part) else {
                break;
            };
            self.tree.select(host, menu, Some(index), true);
            if depth + 1 == parts.len() {
                break;
            }
            self.tree.on_arrow_right(host, menu);
            match self.tree.menu(menu).and_then(|m| m.child) {
                Some(child) => menu = child,
                None => break,
            }
        }
        self.process_requests(host);
        log_debug(&format!("Browsed to {} in {}", target, menu));
        Some(menu)
    }

    /// Act on breadcrumb steps requested by the menus
    pub fn process_requests(&mut self, host: &mut dyn Host) {
        for request in self.tree.take_requests() {
            match request {
                TreeRequest::OpenCrumb { crumb, step } => {
                    let target = crumb as isize + step;
                    if target < 0 {
                        self.browse_vault(host);
                    } else if (target as usize) < self.crumbs.len() {
                        self.folder_menu(host, target as usize, None);
                    }
                }
            }
        }
    }

    pub fn handle_key(&mut self, host: &mut dyn Host, key: KeyEvent, now: Instant) -> bool {
        let handled = self.tree.handle_key(host, key, now);
        self.process_requests(host);
        handled
    }

    /// Mouse button went down
    ///
    /// # Returns
    /// `true` if the click landed on a menu or a crumb
    pub fn on_mouse_down(
        &mut self,
        host: &mut dyn Host,
        point: Point,
        modifiers: KeyModifiers,
        secondary: bool,
        now: Instant,
    ) -> bool {
        self.tree.set_now(now);
        let inside = self.tree.handle_pointer_down(host, point);
        let click = Click { point, modifiers };

        if let Some((id, index)) = self.tree.item_at(point) {
            if secondary {
                self.tree.on_item_menu(host, id, index, click);
            } else {
                self.tree.on_item_click(host, id, index, click);
            }
            self.process_requests(host);
            return true;
        }
        if inside {
            return true;
        }
        if let Some(index) = self.crumb_at(point) {
            if !secondary {
                self.folder_menu(host, index, Some(point));
            }
            return true;
        }
        false
    }

    pub fn on_mouse_move(&mut self, host: &mut dyn Host, point: Point, modifiers: KeyModifiers, now: Instant) {
        self.tree.set_now(now);
        if let Some((id, index)) = self.tree.item_at(point) {
            self.tree.on_item_hover(host, id, index, modifiers);
        }
    }

    pub fn on_wheel(&mut self, host: &mut dyn Host, point: Point, up: bool, now: Instant) -> bool {
        self.tree.set_now(now);
        self.tree.on_wheel(host, point, up)
    }

    /// A drag started at `point`: a menu row or a crumb
    pub fn on_drag_start(&mut self, host: &mut dyn Host, point: Point) -> bool {
        if let Some((id, index)) = self.tree.item_at(point) {
            self.tree.on_item_drag_start(host, id, index);
            return true;
        }
        match self.crumb_at(point) {
            Some(index) => {
                self.on_crumb_drag_start(host, index);
                true
            }
            None => false,
        }
    }

    pub fn on_crumb_drag_start(&mut self, host: &mut dyn Host, index: usize) {
        let Some(crumb) = self.crumbs.get(index) else {
            return;
        };
        if crumb.path == path::ROOT {
            return;
        }
        let entry = host.entry(&crumb.path).unwrap_or_else(|| {
            if crumb.is_folder {
                Entry::folder(crumb.path.clone())
            } else {
                Entry::file(crumb.path.clone())
            }
        });
        host.begin_drag(&entry);
    }

    pub fn tick(&mut self, host: &mut dyn Host, now: Instant) {
        self.tree.tick(host, now);
        self.process_requests(host);
    }

    /// Forward a file tree change to the menus and refresh the trail if it
    /// touched one of the crumbs
    pub fn on_vault_event(&mut self, host: &mut dyn Host, event: &VaultEvent) {
        self.tree.on_vault_event(host, event);

        let touched: Vec<&str> = match event {
            VaultEvent::Create(_) => Vec::new(),
            VaultEvent::Rename { path, old_path } => vec![path.as_str(), old_path.as_str()],
            VaultEvent::Delete(path) => vec![path.as_str()],
        };
        let affected = self
            .crumbs
            .iter()
            .any(|c| touched.iter().any(|t| path::is_within(&c.path, t) && *t != path::ROOT));
        if affected {
            self.last = None;
            let active = host.active_file();
            self.update(&*host, active.as_deref());
        }
    }
}

impl PerWindowComponent for Explorer {
    fn unload(&mut self, host: &mut dyn Host) {
        self.tree.hide_all(host);
        self.crumbs.clear();
        self.last = None;
    }
}

/// Resolve a folder path to an entry, falling back to a bare folder
fn folder_entry(host: &dyn Host, folder: &str) -> Entry {
    if folder == path::ROOT {
        return Entry::root();
    }
    host.entry(folder)
        .filter(Entry::is_folder)
        .unwrap_or_else(|| Entry::folder(folder))
}
