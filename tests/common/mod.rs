//! In-memory host shared by the integration tests
//!
//! Paths are vault paths; a trailing `/` marks an empty folder. Every host
//! call the menus make is recorded so tests can assert on order.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use anyhow::Result;

use quick_explorer::host::{
    ContributedItem, Entry, EntryKind, Feature, FileManager, HoverPopover, Surface, Vault, Workspace,
};
use quick_explorer::logic::file::has_editor;
use quick_explorer::logic::layout::{MenuMetrics, Point, Size};
use quick_explorer::logic::path;
use quick_explorer::menu::MenuItem;
use quick_explorer::MenuTree;

pub struct MockHost {
    pub entries: BTreeMap<String, EntryKind>,
    pub active: Option<String>,
    pub file_explorer: bool,
    pub viewport: Size,
    pub contributed: Vec<ContributedItem>,
    /// Ordered record of calls, e.g. `open:a.md`, `request:a.md`, `hide:3`
    pub log: Vec<String>,
    pub notices: Vec<String>,
    pub opened: Vec<(String, bool)>,
    pub fail_open: bool,
    pub show_unsupported: bool,
    next_popover: u64,
}

impl MockHost {
    pub fn new(paths: &[&str]) -> Self {
        let mut host = Self {
            entries: BTreeMap::new(),
            active: None,
            file_explorer: true,
            viewport: Size::new(200, 60),
            contributed: Vec::new(),
            log: Vec::new(),
            notices: Vec::new(),
            opened: Vec::new(),
            fail_open: false,
            show_unsupported: false,
            next_popover: 1,
        };
        for p in paths {
            host.add(p);
        }
        host
    }

    /// Add a path and its ancestors
    pub fn add(&mut self, p: &str) {
        let is_folder = p.ends_with('/');
        let p = p.trim_end_matches('/');
        for ancestor in path::ancestors(p) {
            if ancestor != path::ROOT && ancestor != p {
                self.entries.insert(ancestor, EntryKind::Folder);
            }
        }
        let kind = if is_folder { EntryKind::Folder } else { EntryKind::File };
        self.entries.insert(p.to_string(), kind);
    }

    pub fn remove(&mut self, p: &str) {
        self.entries.retain(|existing, _| !path::is_within(existing, p));
    }

    pub fn rename(&mut self, old: &str, new: &str) {
        let moved: Vec<(String, EntryKind)> = self
            .entries
            .iter()
            .filter_map(|(existing, kind)| path::rebase(existing, old, new).map(|p| (p, *kind)))
            .collect();
        self.remove(old);
        self.entries.extend(moved);
    }

    pub fn calls(&self, prefix: &str) -> Vec<String> {
        self.log
            .iter()
            .filter(|entry| entry.starts_with(prefix))
            .cloned()
            .collect()
    }
}

impl Vault for MockHost {
    fn entry(&self, p: &str) -> Option<Entry> {
        if p == path::ROOT {
            return Some(Entry::root());
        }
        self.entries.get(p).map(|kind| Entry {
            path: p.to_string(),
            kind: *kind,
        })
    }

    fn children(&self, folder: &str) -> Vec<Entry> {
        self.entries
            .iter()
            .filter(|(p, _)| path::is_child_of(p, folder))
            .map(|(p, kind)| Entry {
                path: p.clone(),
                kind: *kind,
            })
            .collect()
    }

    fn show_unsupported_files(&self) -> bool {
        self.show_unsupported
    }

    fn vault_name(&self) -> String {
        "Vault".to_string()
    }
}

impl Workspace for MockHost {
    fn active_file(&self) -> Option<String> {
        self.active.clone()
    }

    fn open_file(&mut self, p: &str, new_leaf: bool) -> Result<()> {
        self.log.push(format!("open:{}", p));
        if self.fail_open {
            anyhow::bail!("cannot open {}", p);
        }
        self.opened.push((p.to_string(), new_leaf));
        self.active = Some(p.to_string());
        Ok(())
    }

    fn request_hover_preview(&mut self, p: &str) -> Option<HoverPopover> {
        let id = self.next_popover;
        self.next_popover += 1;
        self.log.push(format!("request:{}", p));
        let mut popover = HoverPopover::new(id, p, Size::new(40, 10));
        popover.has_editor = has_editor(&Entry::file(p));
        Some(popover)
    }

    fn hide_popover(&mut self, popover: HoverPopover) {
        self.log.push(format!("hide:{}", popover.path));
    }

    fn release_popover(&mut self, popover: HoverPopover) {
        self.log.push(format!("release:{}", popover.path));
    }

    fn activate_popover(&mut self, popover: HoverPopover, edit: bool) -> Result<()> {
        self.log
            .push(format!("activate:{}:{}:{}", popover.path, popover.pinned, edit));
        Ok(())
    }

    fn is_feature_enabled(&self, feature: Feature) -> bool {
        match feature {
            Feature::FileExplorer => self.file_explorer,
        }
    }

    fn notice(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }

    fn begin_drag(&mut self, entry: &Entry) {
        self.log.push(format!("drag:{}", entry.path));
    }

    fn register_hover_link_source(&mut self, id: &str, _display: &str) {
        self.log.push(format!("source:{}", id));
    }
}

impl FileManager for MockHost {
    fn prompt_for_rename(&mut self, entry: &Entry) {
        self.log.push(format!("rename:{}", entry.path));
    }

    fn prompt_for_deletion(&mut self, entry: &Entry) {
        self.log.push(format!("delete:{}", entry.path));
    }

    fn prompt_for_move(&mut self, entry: &Entry) -> Result<()> {
        self.log.push(format!("move:{}", entry.path));
        Ok(())
    }

    fn create_note(&mut self, folder: &str) -> Result<String> {
        let created = path::join(folder, "Untitled.md");
        self.add(&created);
        self.log.push(format!("create-note:{}", created));
        Ok(created)
    }

    fn create_folder(&mut self, folder: &str) -> Result<String> {
        let created = path::join(folder, "Untitled");
        self.add(&format!("{}/", created));
        self.log.push(format!("create-folder:{}", created));
        Ok(created)
    }

    fn set_attachment_folder(&mut self, folder: &str) -> Result<()> {
        self.log.push(format!("attachments:{}", folder));
        Ok(())
    }

    fn reveal_in_explorer(&mut self, entry: &Entry) -> Result<()> {
        self.log.push(format!("reveal:{}", entry.path));
        Ok(())
    }

    fn file_menu_items(&mut self, _entry: &Entry) -> Vec<ContributedItem> {
        self.contributed.clone()
    }

    fn run_contributed(&mut self, id: &str, entry: &Entry) -> Result<()> {
        self.log.push(format!("contributed:{}:{}", id, entry.path));
        Ok(())
    }
}

impl Surface for MockHost {
    fn viewport(&self) -> Size {
        self.viewport
    }

    fn measure_menu(&self, items: &[MenuItem]) -> MenuMetrics {
        let widest = items.iter().map(|i| i.title.chars().count()).max().unwrap_or(0);
        MenuMetrics {
            width: widest as i32 + 6,
            height: items.len() as i32 + 2,
            row_height: 1,
            padding: 1,
        }
    }

    fn measure_text(&self, text: &str) -> i32 {
        text.chars().count() as i32
    }
}

/// Titles of a menu's rows, separators as `---`
pub fn titles(tree: &MenuTree, id: quick_explorer::MenuId) -> Vec<String> {
    tree.menu(id)
        .map(|m| {
            m.items
                .iter()
                .map(|item| {
                    if item.is_separator() {
                        "---".to_string()
                    } else {
                        item.title.clone()
                    }
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Title of the selected row
pub fn selected_title(tree: &MenuTree, id: quick_explorer::MenuId) -> Option<String> {
    tree.menu(id)?.selected_item().map(|item| item.title.clone())
}

/// Centre of row `index` of a menu
pub fn row_point(tree: &MenuTree, id: quick_explorer::MenuId, index: usize) -> Point {
    let rect = tree.item_rect(id, index).unwrap();
    Point::new(rect.left + 1, rect.top)
}

pub fn later(start: Instant, millis: u64) -> Instant {
    start + Duration::from_millis(millis)
}
