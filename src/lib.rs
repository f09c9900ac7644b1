//! Quick Explorer Library
//!
//! Breadcrumb trail + cascading popup menus for browsing a vault's folder tree.
//! The core talks to its host only through the traits in [`host`], so the same
//! menu state machine drives the terminal frontend and the integration tests.

use std::sync::atomic::{AtomicBool, Ordering};

pub mod commands;
pub mod explorer;
pub mod host;
pub mod logic;
pub mod menu;
pub mod utils;
pub mod vault;
pub mod window;

pub use explorer::{Crumb, Explorer};
pub use host::{Entry, EntryKind, Host, HoverPopover, VaultEvent};
pub use menu::{AutoPreview, MenuId, MenuTree};
pub use window::{PerWindowComponent, WindowId, WindowManager};

// Global flag for debug mode
static DEBUG_MODE: AtomicBool = AtomicBool::new(false);

/// Enable or disable writing to the debug log
pub fn set_debug_mode(enabled: bool) {
    DEBUG_MODE.store(enabled, Ordering::Relaxed);
}

pub fn debug_mode() -> bool {
    DEBUG_MODE.load(Ordering::Relaxed)
}

pub fn log_debug(msg: &str) {
    // Only log if debug mode is enabled
    if !debug_mode() {
        return;
    }

    use std::fs::OpenOptions;
    use std::io::Write;
    if let Ok(mut file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(utils::get_debug_log_path())
    {
        let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
        let _ = writeln!(file, "[{}] {}", timestamp, msg);
    }
}
