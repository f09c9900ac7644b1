//! Commands exposed to the host
//!
//! Two palette commands plus a "Show in Quick Explorer" entry contributed to
//! the host's native file menus.

use anyhow::Result;

use crate::explorer::Explorer;
use crate::host::{ContributedItem, Entry, Host};
use crate::menu::MenuId;

pub const BROWSE_VAULT: &str = "browse-vault";
pub const BROWSE_CURRENT: &str = "browse-current";
pub const REVEAL_IN_QUICK_EXPLORER: &str = "reveal-in-quick-explorer";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Command {
    pub id: &'static str,
    pub name: &'static str,
}

pub const COMMANDS: &[Command] = &[
    Command {
        id: BROWSE_VAULT,
        name: "Browse vault",
    },
    Command {
        id: BROWSE_CURRENT,
        name: "Browse current folder",
    },
];

/// Run a palette command against a window's explorer
///
/// # Returns
/// The menu that was opened, if any
///
/// # Errors
/// Unknown command ids
pub fn run_command(explorer: &mut Explorer, host: &mut dyn Host, id: &str) -> Result<Option<MenuId>> {
    match id {
        BROWSE_VAULT => Ok(explorer.browse_vault(host)),
        BROWSE_CURRENT => Ok(explorer.browse_current(host)),
        _ => anyhow::bail!("Unknown command: {}", id),
    }
}

/// Add "Show in Quick Explorer" to a host file menu
///
/// Goes right after the host's own reveal entry, or at the end if there is
/// none.
pub fn contribute_file_menu(items: &mut Vec<ContributedItem>) {
    if items.iter().any(|item| item.id == REVEAL_IN_QUICK_EXPLORER) {
        return;
    }
    let item = ContributedItem {
        id: REVEAL_IN_QUICK_EXPLORER.to_string(),
        title: "Show in Quick Explorer".to_string(),
        icon: "folder".to_string(),
        reveal: false,
    };
    match items.iter().position(|existing| existing.reveal) {
        Some(index) => items.insert(index + 1, item),
        None => items.push(item),
    }
}

/// Handle a contributed menu item picked by the user
///
/// # Returns
/// `Ok(false)` if the id isn't one of ours
pub fn run_contributed(explorer: &mut Explorer, host: &mut dyn Host, id: &str, entry: &Entry) -> Result<bool> {
    if id != REVEAL_IN_QUICK_EXPLORER {
        return Ok(false);
    }
    match explorer.browse_file(host, &entry.path) {
        Some(_) => Ok(true),
        None => anyhow::bail!("Could not browse to {}", entry.path),
    }
}
