//! Terminal host
//!
//! Implements the host traits on top of a directory vault: the "open" file is
//! shown in the main pane, previews are read in the background and file
//! prompts become dialogs the key handler drives.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Instant;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use unicode_width::UnicodeWidthStr;

use quick_explorer::commands::contribute_file_menu;
use quick_explorer::host::{
    ContributedItem, Entry, Feature, FileManager, HoverPopover, Surface, Vault, VaultEvent, Workspace,
};
use quick_explorer::log_debug;
use quick_explorer::logic::file::has_editor;
use quick_explorer::logic::layout::{MenuMetrics, Size};
use quick_explorer::logic::path;
use quick_explorer::menu::MenuItem;
use quick_explorer::utils::format_bytes;
use quick_explorer::vault::FsVault;

pub const OPEN_IN_DEFAULT_APP: &str = "open-in-default-app";
pub const REVEAL_IN_SYSTEM: &str = "reveal-in-system";

/// Icon column plus the gap after it
const ICON_WIDTH: usize = 2;
const MIN_MENU_WIDTH: i32 = 12;

/// A prompt waiting for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    Rename { entry: Entry, input: String },
    Move { entry: Entry, input: String },
    ConfirmDelete { entry: Entry },
}

#[derive(Debug)]
struct PreviewMessage {
    id: u64,
    path: String,
    text: String,
}

/// The file shown in the main pane
#[derive(Debug, Default)]
pub struct Pane {
    pub path: Option<String>,
    pub lines: Vec<String>,
    pub editing: bool,
    /// Files opened in a new leaf so far
    pub leaves: usize,
}

pub struct TerminalHost {
    vault: FsVault,
    pub pane: Pane,
    viewport: Size,
    pub toast_message: Option<(String, Instant)>,
    pub dialog: Option<Dialog>,
    /// Preview text by popover id; `None` while still loading
    previews: HashMap<u64, Option<Vec<String>>>,
    /// Pinned previews handed back by closed menus
    pub floating: Vec<HoverPopover>,
    next_popover_id: u64,
    preview_size: Size,
    preview_tx: mpsc::UnboundedSender<PreviewMessage>,
    preview_rx: mpsc::UnboundedReceiver<PreviewMessage>,
    events: Vec<VaultEvent>,
    pending_command: Option<(String, Entry)>,
    pub attachment_folder: Option<String>,
    open_command: Option<String>,
    file_explorer: bool,
    pub dragging: Option<Entry>,
}

impl TerminalHost {
    pub fn new(vault: FsVault, viewport: Size, preview_size: Size) -> Self {
        let (preview_tx, preview_rx) = mpsc::unbounded_channel();
        Self {
            vault,
            pane: Pane::default(),
            viewport,
            toast_message: None,
            dialog: None,
            previews: HashMap::new(),
            floating: Vec::new(),
            next_popover_id: 1,
            preview_size,
            preview_tx,
            preview_rx,
            events: Vec::new(),
            pending_command: None,
            attachment_folder: None,
            open_command: None,
            file_explorer: true,
            dragging: None,
        }
    }

    pub fn with_open_command(mut self, command: Option<String>) -> Self {
        self.open_command = command;
        self
    }

    pub fn with_file_explorer(mut self, enabled: bool) -> Self {
        self.file_explorer = enabled;
        self
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Loaded text of a preview, `None` while it is still being read
    pub fn preview_lines(&self, id: u64) -> Option<&[String]> {
        self.previews.get(&id).and_then(|lines| lines.as_deref())
    }

    /// Collect previews that finished loading
    ///
    /// # Returns
    /// `(path, line count)` for every preview still wanted
    pub fn poll_previews(&mut self) -> Vec<(String, i32)> {
        let mut loaded = Vec::new();
        while let Ok(message) = self.preview_rx.try_recv() {
            // Hidden before it finished loading
            let Some(slot) = self.previews.get_mut(&message.id) else {
                continue;
            };
            let lines: Vec<String> = message.text.lines().map(str::to_string).collect();
            loaded.push((message.path, lines.len() as i32));
            *slot = Some(lines);
        }
        loaded
    }

    pub fn take_events(&mut self) -> Vec<VaultEvent> {
        std::mem::take(&mut self.events)
    }

    /// A contributed menu item that only the explorer can run
    pub fn take_pending_command(&mut self) -> Option<(String, Entry)> {
        self.pending_command.take()
    }

    pub fn close_floating(&mut self) {
        for popover in std::mem::take(&mut self.floating) {
            self.previews.remove(&popover.id);
        }
    }

    pub fn dismiss_stale_toast(&mut self) {
        if let Some((_, shown)) = self.toast_message {
            if shown.elapsed().as_millis() >= 2000 {
                self.toast_message = None;
            }
        }
    }

    /// Carry out the open dialog
    ///
    /// # Errors
    /// The dialog is consumed either way; failures are for the caller to show
    pub fn confirm_dialog(&mut self) -> Result<()> {
        let Some(dialog) = self.dialog.take() else {
            return Ok(());
        };
        let event = match dialog {
            Dialog::Rename { entry, input } => self.vault.rename(&entry.path, &input)?,
            Dialog::Move { entry, input } => self.vault.move_to(&entry.path, &folder_input(&input))?,
            Dialog::ConfirmDelete { entry } => self.vault.delete(&entry.path)?,
        };
        self.apply_event(event);
        Ok(())
    }

    /// Drop whatever is being dragged onto `folder`
    pub fn drop_on(&mut self, folder: &str) -> Result<()> {
        let Some(entry) = self.dragging.take() else {
            return Ok(());
        };
        if !self.file_explorer {
            self.notice("File explorer core plugin must be enabled to move files or folders");
            return Ok(());
        }
        if entry.parent_path().as_deref() == Some(folder) {
            return Ok(());
        }
        let event = self.vault.move_to(&entry.path, folder)?;
        self.notice(&format!("Moved {} to {}", entry.name(), folder));
        self.apply_event(event);
        Ok(())
    }

    /// Keep the open file in step with a change, then queue it for the menus
    fn apply_event(&mut self, event: VaultEvent) {
        match &event {
            VaultEvent::Rename { path: new_path, old_path } => {
                let moved = self
                    .pane
                    .path
                    .as_deref()
                    .and_then(|open| path::rebase(open, old_path, new_path));
                if moved.is_some() {
                    self.pane.path = moved;
                }
            }
            VaultEvent::Delete(deleted) => {
                if self
                    .pane
                    .path
                    .as_deref()
                    .is_some_and(|open| path::is_within(open, deleted))
                {
                    self.pane = Pane {
                        leaves: self.pane.leaves,
                        ..Pane::default()
                    };
                }
            }
            VaultEvent::Create(_) => {}
        }
        log_debug(&format!("Vault event: {:?}", event));
        self.events.push(event);
    }

    fn open_external(&mut self, target: &Path) -> Result<()> {
        let program = self.open_command.clone().unwrap_or_else(default_open_command);
        Command::new(&program)
            .arg(target)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("Failed to open with '{}'", program))?;
        log_debug(&format!("open_command: spawned {} {}", program, target.display()));
        self.notice(&format!("Opened: {}", target.display()));
        Ok(())
    }

    fn load_preview(&self, id: u64, vault_path: &str) {
        let file = self.vault.resolve(vault_path);
        let path = vault_path.to_string();
        let tx = self.preview_tx.clone();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    let text = read_preview(file).await;
                    let _ = tx.send(PreviewMessage { id, path, text });
                });
            }
            Err(_) => {
                let text = std::fs::read_to_string(&file)
                    .unwrap_or_else(|_| describe_unreadable(std::fs::metadata(&file).map(|m| m.len()).ok()));
                let _ = tx.send(PreviewMessage { id, path, text });
            }
        }
    }
}

async fn read_preview(file: PathBuf) -> String {
    match tokio::fs::read_to_string(&file).await {
        Ok(text) => text,
        Err(_) => describe_unreadable(tokio::fs::metadata(&file).await.map(|m| m.len()).ok()),
    }
}

fn describe_unreadable(size: Option<u64>) -> String {
    match size {
        Some(bytes) => format!("(binary file, {})", format_bytes(bytes)),
        None => "(file not found)".to_string(),
    }
}

fn default_open_command() -> String {
    if cfg!(target_os = "macos") {
        "open".to_string()
    } else if cfg!(target_os = "windows") {
        "explorer".to_string()
    } else {
        "xdg-open".to_string()
    }
}

/// Typed folder path to a vault path (blank means the root)
fn folder_input(input: &str) -> String {
    let trimmed = input.trim().trim_matches('/');
    if trimmed.is_empty() {
        path::ROOT.to_string()
    } else {
        trimmed.to_string()
    }
}

impl Vault for TerminalHost {
    fn entry(&self, path: &str) -> Option<Entry> {
        self.vault.entry(path)
    }

    fn children(&self, folder: &str) -> Vec<Entry> {
        self.vault.children(folder)
    }

    fn show_unsupported_files(&self) -> bool {
        self.vault.show_unsupported_files()
    }

    fn vault_name(&self) -> String {
        self.vault.vault_name()
    }
}

impl Workspace for TerminalHost {
    fn active_file(&self) -> Option<String> {
        self.pane.path.clone()
    }

    fn open_file(&mut self, path: &str, new_leaf: bool) -> Result<()> {
        let entry = self
            .vault
            .entry(path)
            .with_context(|| format!("File not found: {}", path))?;
        if entry.is_folder() {
            anyhow::bail!("Cannot open a folder: {}", path);
        }
        let text = self.vault.read_to_string(path).unwrap_or_else(|_| {
            describe_unreadable(std::fs::metadata(self.vault.resolve(path)).map(|m| m.len()).ok())
        });
        self.pane.path = Some(entry.path.clone());
        self.pane.lines = text.lines().map(str::to_string).collect();
        self.pane.editing = false;
        if new_leaf {
            self.pane.leaves += 1;
            self.notice(&format!("Opened {} in a new tab", entry.name()));
        }
        log_debug(&format!("Opened {} (new leaf: {})", path, new_leaf));
        Ok(())
    }

    fn request_hover_preview(&mut self, path: &str) -> Option<HoverPopover> {
        let id = self.next_popover_id;
        self.next_popover_id += 1;

        let size = Size::new(
            self.preview_size.width.min(self.viewport.width / 2).max(10),
            self.preview_size.height.min(self.viewport.height - 2).max(3),
        );
        let mut popover = HoverPopover::new(id, path, size);
        popover.has_editor = has_editor(&Entry::file(path));
        popover.scroll.page_height = (size.height - 2).max(1);

        self.previews.insert(id, None);
        self.load_preview(id, path);
        Some(popover)
    }

    fn hide_popover(&mut self, popover: HoverPopover) {
        self.previews.remove(&popover.id);
        self.floating.retain(|p| p.id != popover.id);
    }

    fn release_popover(&mut self, popover: HoverPopover) {
        log_debug(&format!("Keeping pinned preview of {}", popover.path));
        self.floating.push(popover);
    }

    fn activate_popover(&mut self, popover: HoverPopover, edit: bool) -> Result<()> {
        self.previews.remove(&popover.id);
        self.open_file(&popover.path, false)?;
        self.pane.editing = edit;
        Ok(())
    }

    fn is_feature_enabled(&self, feature: Feature) -> bool {
        match feature {
            Feature::FileExplorer => self.file_explorer,
        }
    }

    fn notice(&mut self, message: &str) {
        log_debug(&format!("Notice: {}", message));
        self.toast_message = Some((message.to_string(), Instant::now()));
    }

    fn begin_drag(&mut self, entry: &Entry) {
        self.dragging = Some(entry.clone());
        self.notice(&format!("Drop {} on a folder crumb to move it", entry.name()));
    }

    fn register_hover_link_source(&mut self, id: &str, display: &str) {
        log_debug(&format!("Hover link source registered: {} ({})", id, display));
    }
}

impl FileManager for TerminalHost {
    fn prompt_for_rename(&mut self, entry: &Entry) {
        self.dialog = Some(Dialog::Rename {
            entry: entry.clone(),
            input: entry.name().to_string(),
        });
    }

    fn prompt_for_deletion(&mut self, entry: &Entry) {
        self.dialog = Some(Dialog::ConfirmDelete { entry: entry.clone() });
    }

    fn prompt_for_move(&mut self, entry: &Entry) -> Result<()> {
        let parent = entry.parent_path().context("Cannot move the vault root")?;
        self.dialog = Some(Dialog::Move {
            entry: entry.clone(),
            input: if parent == path::ROOT { String::new() } else { parent },
        });
        Ok(())
    }

    fn create_note(&mut self, folder: &str) -> Result<String> {
        let (created, event) = self.vault.create_note(folder)?;
        self.apply_event(event);
        Ok(created)
    }

    fn create_folder(&mut self, folder: &str) -> Result<String> {
        let (created, event) = self.vault.create_folder(folder)?;
        self.notice(&format!("Created folder {}", created));
        self.apply_event(event);
        Ok(created)
    }

    fn set_attachment_folder(&mut self, folder: &str) -> Result<()> {
        self.attachment_folder = Some(folder.to_string());
        self.notice(&format!("Attachment folder set to {}", folder));
        Ok(())
    }

    fn reveal_in_explorer(&mut self, entry: &Entry) -> Result<()> {
        let target = self.vault.resolve(&entry.path);
        self.open_external(&target)
    }

    fn file_menu_items(&mut self, entry: &Entry) -> Vec<ContributedItem> {
        let mut items = vec![ContributedItem {
            id: OPEN_IN_DEFAULT_APP.to_string(),
            title: "Open in default app".to_string(),
            icon: "arrow-up-right".to_string(),
            reveal: false,
        }];
        if !entry.is_folder() {
            items.push(ContributedItem {
                id: REVEAL_IN_SYSTEM.to_string(),
                title: "Reveal in system file manager".to_string(),
                icon: "folder-open".to_string(),
                reveal: true,
            });
        }
        contribute_file_menu(&mut items);
        items
    }

    fn run_contributed(&mut self, id: &str, entry: &Entry) -> Result<()> {
        match id {
            OPEN_IN_DEFAULT_APP => {
                let target = self.vault.resolve(&entry.path);
                self.open_external(&target)
            }
            REVEAL_IN_SYSTEM => {
                let parent = entry.parent_path().unwrap_or_else(|| path::ROOT.to_string());
                let target = self.vault.resolve(&parent);
                self.open_external(&target)
            }
            _ => {
                self.pending_command = Some((id.to_string(), entry.clone()));
                Ok(())
            }
        }
    }
}

impl Surface for TerminalHost {
    fn viewport(&self) -> Size {
        self.viewport
    }

    fn measure_menu(&self, items: &[MenuItem]) -> MenuMetrics {
        let widest = items
            .iter()
            .map(|item| {
                let badge = item.badge.as_deref().map_or(0, |b| b.width() + 1);
                ICON_WIDTH + item.title.width() + badge
            })
            .max()
            .unwrap_or(0);
        MenuMetrics {
            width: (widest as i32 + 4).max(MIN_MENU_WIDTH),
            height: items.len() as i32 + 2,
            row_height: 1,
            padding: 1,
        }
    }

    fn measure_text(&self, text: &str) -> i32 {
        text.width() as i32
    }
}
