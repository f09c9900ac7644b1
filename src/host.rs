//! Host Contracts
//!
//! Everything the menu core needs from the application it is embedded in:
//! the file tree (`Vault`), the workspace (opening files, preview popovers,
//! notices), file management prompts (`FileManager`) and measurement
//! (`Surface`). The core never owns a UI toolkit; it calls through these.

use anyhow::Result;

use crate::logic::layout::{MenuMetrics, Point, Rect, Size};
use crate::logic::path;
use crate::menu::MenuItem;

pub use crate::logic::path::ROOT as ROOT_PATH;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Folder,
    File,
}

/// A file or folder in the vault, identified by its vault path
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Entry {
    pub path: String,
    pub kind: EntryKind,
}

impl Entry {
    pub fn folder(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Folder,
        }
    }

    pub fn file(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::File,
        }
    }

    pub fn root() -> Self {
        Self::folder(ROOT_PATH)
    }

    pub fn is_folder(&self) -> bool {
        self.kind == EntryKind::Folder
    }

    pub fn is_root(&self) -> bool {
        self.path == ROOT_PATH
    }

    /// Full name including extension
    pub fn name(&self) -> &str {
        path::name_of(&self.path)
    }

    /// Name without extension (folders keep their full name)
    pub fn basename(&self) -> &str {
        if self.is_folder() {
            self.name()
        } else {
            path::stem_of(self.name())
        }
    }

    pub fn extension(&self) -> String {
        if self.is_folder() {
            String::new()
        } else {
            path::extension_of(self.name())
        }
    }

    pub fn parent_path(&self) -> Option<String> {
        path::parent_of(&self.path)
    }
}

/// File tree change notifications
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VaultEvent {
    Create(String),
    Rename { path: String, old_path: String },
    Delete(String),
}

/// Companion features an action may depend on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Feature {
    /// The host's file explorer (needed for new folder, move and reveal)
    FileExplorer,
}

/// Scroll position of a preview's content
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollState {
    pub top: i32,
    pub content_height: i32,
    pub page_height: i32,
}

impl ScrollState {
    pub fn max_top(&self) -> i32 {
        (self.content_height - self.page_height).max(0)
    }
}

/// A hover preview created by the host on request
///
/// Owned by at most one folder menu at a time. Dropping ownership always
/// goes back through the host (`hide_popover`, `release_popover` or
/// `activate_popover`), never by letting the value fall out of scope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoverPopover {
    pub id: u64,
    pub path: String,
    pub size: Size,
    pub position: Option<Point>,
    /// Pinned open by the user
    pub pinned: bool,
    /// Showing as an auto-preview
    pub auto: bool,
    /// Host hover events may pin/unpin it
    pub tracks_hover: bool,
    /// Has an editable surface that can take focus
    pub has_editor: bool,
    pub scroll: ScrollState,
}

impl HoverPopover {
    pub fn new(id: u64, path: impl Into<String>, size: Size) -> Self {
        Self {
            id,
            path: path.into(),
            size,
            position: None,
            pinned: false,
            auto: false,
            tracks_hover: true,
            has_editor: false,
            scroll: ScrollState {
                top: 0,
                content_height: 0,
                page_height: size.height,
            },
        }
    }

    pub fn rect(&self) -> Option<Rect> {
        self.position.map(|p| Rect::at(p, self.size))
    }
}

/// An item another integration adds to a file context menu
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContributedItem {
    pub id: String,
    pub title: String,
    pub icon: String,
    /// The host's own "reveal file" entry
    pub reveal: bool,
}

pub trait Vault {
    fn entry(&self, path: &str) -> Option<Entry>;

    /// Direct children of a folder, in no particular order
    fn children(&self, folder: &str) -> Vec<Entry>;

    fn show_unsupported_files(&self) -> bool {
        false
    }

    fn vault_name(&self) -> String {
        "Vault".to_string()
    }
}

pub trait Workspace {
    fn active_file(&self) -> Option<String>;

    fn can_open(&self, entry: &Entry) -> bool {
        crate::logic::file::is_supported_extension(&entry.extension())
    }

    /// Open a file, in a new leaf when `new_leaf` is set
    fn open_file(&mut self, path: &str, new_leaf: bool) -> Result<()>;

    /// Ask for a hover preview of `path` (the hover-link event)
    fn request_hover_preview(&mut self, path: &str) -> Option<HoverPopover>;

    /// Tear a popover down
    fn hide_popover(&mut self, popover: HoverPopover);

    /// Hand a user-pinned popover back to the host, left open
    fn release_popover(&mut self, popover: HoverPopover);

    /// Focus a popover's editor, pinned, optionally in edit mode
    fn activate_popover(&mut self, popover: HoverPopover, edit: bool) -> Result<()>;

    fn is_feature_enabled(&self, feature: Feature) -> bool;

    fn notice(&mut self, message: &str);

    fn begin_drag(&mut self, _entry: &Entry) {}

    fn register_hover_link_source(&mut self, _id: &str, _display: &str) {}
}

pub trait FileManager {
    fn prompt_for_rename(&mut self, entry: &Entry);

    fn prompt_for_deletion(&mut self, entry: &Entry);

    fn prompt_for_move(&mut self, entry: &Entry) -> Result<()>;

    /// Create a new note in `folder`, returning its path
    fn create_note(&mut self, folder: &str) -> Result<String>;

    /// Create a new folder in `folder`, returning its path
    fn create_folder(&mut self, folder: &str) -> Result<String>;

    fn set_attachment_folder(&mut self, folder: &str) -> Result<()>;

    fn reveal_in_explorer(&mut self, entry: &Entry) -> Result<()>;

    /// Items other integrations add to a file menu (the "file-menu" event)
    fn file_menu_items(&mut self, _entry: &Entry) -> Vec<ContributedItem> {
        Vec::new()
    }

    fn run_contributed(&mut self, _id: &str, _entry: &Entry) -> Result<()> {
        Ok(())
    }
}

pub trait Surface {
    fn viewport(&self) -> Size;

    /// Measure a menu with these items as it would render
    fn measure_menu(&self, items: &[MenuItem]) -> MenuMetrics;

    fn measure_text(&self, text: &str) -> i32;
}

/// Everything the core needs from its host
pub trait Host: Vault + Workspace + FileManager + Surface {}

impl<T: Vault + Workspace + FileManager + Surface> Host for T {}
