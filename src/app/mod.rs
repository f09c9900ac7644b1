//! App Orchestration
//!
//! `App` ties the terminal host to one `Explorer` per window and moves
//! background results (loaded previews, vault changes, pending commands)
//! between them. Window bookkeeping lives in `windows`.

pub(crate) mod host;
pub(crate) mod windows;

use std::time::{Duration, Instant};

use anyhow::Result;

use quick_explorer::commands;
use quick_explorer::host::{Surface, Workspace};
use quick_explorer::log_debug;
use quick_explorer::logic::layout::{CascadeOptions, Point, Rect, Size};
use quick_explorer::vault::FsVault;
use quick_explorer::{AutoPreview, Explorer, MenuId, WindowId, WindowManager};

use crate::config::Config;
use crate::ui::icons::{IconMode, IconRenderer, IconTheme};
use host::TerminalHost;

/// Upper bound on how long the event loop sleeps
const MAX_POLL: Duration = Duration::from_millis(250);

pub struct App {
    pub host: TerminalHost,
    pub windows: WindowManager<Explorer>,
    pub window: WindowId,
    pub should_quit: bool,
    pub icon_renderer: IconRenderer,
    /// Where the left button went down, until a drag starts or it is released
    pub pressed: Option<Point>,
    auto_preview: AutoPreview,
    last_active: Option<String>,
}

impl App {
    pub fn new(config: &Config, vault_dir: &str, viewport: Size) -> Result<Self> {
        let vault = FsVault::open(vault_dir)?
            .with_ignore(&config.ignore)
            .with_show_unsupported(config.show_unsupported_files);
        log_debug(&format!("Opened vault {}", vault.root().display()));

        let host = TerminalHost::new(
            vault,
            viewport,
            Size::new(config.preview_width, config.preview_height),
        )
        .with_open_command(config.open_command.clone())
        .with_file_explorer(config.file_explorer);

        let auto_preview = AutoPreview::new(config.auto_preview);
        let options = CascadeOptions {
            h_overlap: config.h_overlap,
            v_overlap: config.v_overlap,
        };
        let shared = auto_preview.clone();
        let windows = WindowManager::new(move |_| {
            Explorer::new(shared.clone(), Rect::new(0, 0, 1, 1)).with_options(options)
        });

        let icon_mode = match config.icon_mode.to_lowercase().as_str() {
            "emoji" => IconMode::Emoji,
            _ => IconMode::NerdFont,
        };

        let mut app = Self {
            host,
            windows,
            window: 1,
            should_quit: false,
            icon_renderer: IconRenderer::new(icon_mode, IconTheme::default()),
            pressed: None,
            auto_preview,
            last_active: None,
        };
        app.with_explorer(|_, _| ());
        Ok(app)
    }

    pub fn auto_preview(&self) -> bool {
        self.auto_preview.get()
    }

    /// Title bar area for the current viewport
    pub fn bar(&self) -> Rect {
        let viewport = self.host.viewport();
        // Leave room for the window tabs on the left
        let tabs = windows::tab_strip_width(&self.windows.windows());
        Rect::new(tabs, 0, (viewport.width - tabs).max(1), 1)
    }

    /// Run `f` with the current window's explorer, creating it if needed
    pub fn with_explorer<R>(&mut self, f: impl FnOnce(&mut Explorer, &mut TerminalHost) -> R) -> R {
        let (_, created) = self.windows.for_window(self.window);
        if created {
            // A new window can change the tab strip, and with it every bar
            self.relayout_bars();
        }
        let (explorer, _) = self.windows.for_window(self.window);
        if created {
            explorer.load(&mut self.host);
        }
        f(explorer, &mut self.host)
    }

    pub fn explorer(&self) -> Option<&Explorer> {
        self.windows.get(self.window)
    }

    /// Open a file from the command line
    pub fn open_initial(&mut self, file: &str) {
        if let Err(e) = self.host.open_file(file, false) {
            log_debug(&format!("Failed to open {}: {}", file, e));
            self.notice_error(&e);
        }
    }

    pub fn run_command(&mut self, id: &str) -> Option<MenuId> {
        let result = self.with_explorer(|explorer, host| commands::run_command(explorer, host, id));
        match result {
            Ok(menu) => menu,
            Err(e) => {
                self.notice_error(&e);
                None
            }
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.host.set_viewport(Size::new(width as i32, height as i32));
        self.relayout_bars();
    }

    pub(crate) fn relayout_bars(&mut self) {
        let bar = self.bar();
        let host = &self.host;
        self.windows.for_each(|_, explorer| explorer.set_bar(host, bar));
    }

    /// How long the event loop may wait before the next timer is due
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        self.explorer()
            .and_then(|e| e.tree.next_deadline())
            .map_or(MAX_POLL, |deadline| deadline.saturating_duration_since(now))
            .min(MAX_POLL)
    }

    pub fn tick(&mut self, now: Instant) {
        let host = &mut self.host;
        self.windows.for_each(|_, explorer| explorer.tick(host, now));
    }

    /// Hand background results to every window
    pub fn process_background(&mut self) {
        for (path, lines) in self.host.poll_previews() {
            self.windows
                .for_each(|_, explorer| explorer.tree.popover_loaded(&path, lines));
        }

        for event in self.host.take_events() {
            let host = &mut self.host;
            self.windows
                .for_each(|_, explorer| explorer.on_vault_event(host, &event));
        }

        let active = self.host.active_file();
        if active != self.last_active {
            let host = &self.host;
            self.windows
                .for_each(|_, explorer| {
                    explorer.update(host, active.as_deref());
                });
            self.last_active = active;
        }

        if let Some((id, entry)) = self.host.take_pending_command() {
            let result = self.with_explorer(|explorer, host| {
                commands::run_contributed(explorer, host, &id, &entry)
            });
            match result {
                Ok(true) => {}
                Ok(false) => log_debug(&format!("No handler for menu item {}", id)),
                Err(e) => self.notice_error(&e),
            }
        }
    }

    pub fn notice_error(&mut self, error: &anyhow::Error) {
        self.host.notice(&format!("Error: {}", error));
    }

    pub fn shutdown(&mut self) {
        self.windows.unload_all(&mut self.host);
        self.host.close_floating();
    }
}
