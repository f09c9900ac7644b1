//! Context menus: file actions for a single file or folder

use super::{ContextMenu, ItemKind, ItemOutcome, MenuId, MenuItem, MenuKind, MenuTree, Parent};
use crate::host::{Entry, Feature, Host, VaultEvent};
use crate::log_debug;
use crate::logic::path;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FileAction {
    NewNote,
    NewFolder,
    SetAttachmentFolder,
    Rename,
    Delete,
    RevealInExplorer,
    /// An item added by another integration, run through the host
    Contributed(String),
}

impl FileAction {
    /// Host feature the action can't run without
    pub fn required_feature(&self) -> Option<Feature> {
        match self {
            FileAction::NewFolder | FileAction::RevealInExplorer => Some(Feature::FileExplorer),
            _ => None,
        }
    }

    fn disabled_notice(&self) -> &'static str {
        match self {
            FileAction::NewFolder => "The File Explorer core plugin must be enabled to create new folders",
            _ => "The File Explorer core plugin must be enabled for this action",
        }
    }
}

fn action_item(title: &str, icon: &str, action: FileAction) -> MenuItem {
    MenuItem::new(title, icon, ItemKind::Action(action))
}

impl MenuTree {
    /// Create (but don't show) the action menu for `target`
    pub fn create_context_menu(&mut self, host: &mut dyn Host, parent: Parent, target: Entry) -> MenuId {
        let kind = MenuKind::Context(ContextMenu { target: target.clone() });
        let id = self.create_menu(host, parent, kind);

        let mut items = Vec::new();
        if target.is_folder() {
            items.push(action_item("New note", "create-new", FileAction::NewNote));
            items.push(action_item("New folder", "folder", FileAction::NewFolder));
            items.push(action_item("Set as attachment folder", "image-file", FileAction::SetAttachmentFolder));
            items.push(MenuItem::separator());
        }
        items.push(action_item("Rename", "pencil", FileAction::Rename));
        items.push(action_item("Delete", "trash", FileAction::Delete));
        if target.is_folder() && host.is_feature_enabled(Feature::FileExplorer) {
            items.push(action_item("Reveal in file explorer", "folder", FileAction::RevealInExplorer));
        }

        // Host-contributed "reveal" entries go right after Delete, the rest at the end
        let (reveal, others): (Vec<_>, Vec<_>) = host
            .file_menu_items(&target)
            .into_iter()
            .partition(|item| item.reveal);
        let after_delete = items
            .iter()
            .position(|item| item.kind == ItemKind::Action(FileAction::Delete))
            .map_or(items.len(), |i| i + 1);
        for (offset, c) in reveal.into_iter().enumerate() {
            items.insert(
                after_delete + offset,
                action_item(&c.title, &c.icon, FileAction::Contributed(c.id)),
            );
        }
        if !others.is_empty() {
            items.push(MenuItem::separator());
            items.extend(
                others
                    .into_iter()
                    .map(|c| action_item(&c.title, &c.icon, FileAction::Contributed(c.id))),
            );
        }

        for item in items {
            self.add_item(id, item);
        }
        id
    }

    /// Run a file action against the menu's target
    ///
    /// An action whose host feature is off only shows a notice; everything
    /// else closes the chain first and then runs.
    pub(super) fn run_action(
        &mut self,
        host: &mut dyn Host,
        id: MenuId,
        action: &FileAction,
        new_leaf: bool,
    ) -> ItemOutcome {
        let Some(target) = self.menus.get(&id).and_then(|m| match &m.kind {
            MenuKind::Context(context) => Some(context.target.clone()),
            MenuKind::Folder(_) => None,
        }) else {
            return ItemOutcome::KeepOpen;
        };

        if let Some(feature) = action.required_feature() {
            if !host.is_feature_enabled(feature) {
                host.notice(action.disabled_notice());
                return ItemOutcome::KeepOpen;
            }
        }

        self.hide_chain(host, id);
        let result = match action {
            FileAction::NewNote => host
                .create_note(&target.path)
                .and_then(|created| host.open_file(&created, new_leaf)),
            FileAction::NewFolder => host.create_folder(&target.path).map(|_| ()),
            FileAction::SetAttachmentFolder => host.set_attachment_folder(&target.path),
            FileAction::Rename => {
                host.prompt_for_rename(&target);
                Ok(())
            }
            FileAction::Delete => {
                host.prompt_for_deletion(&target);
                Ok(())
            }
            FileAction::RevealInExplorer => host.reveal_in_explorer(&target),
            FileAction::Contributed(item) => host.run_contributed(item, &target),
        };

        if let Err(e) = result {
            log_debug(&format!("{:?} failed for {}: {}", action, target.path, e));
            host.notice(&format!("Error: {}", e));
        }
        ItemOutcome::Close
    }

    pub(super) fn context_vault_event(&mut self, host: &mut dyn Host, id: MenuId, event: &VaultEvent) {
        let Some(MenuKind::Context(context)) = self.menus.get_mut(&id).map(|m| &mut m.kind) else {
            return;
        };
        match event {
            VaultEvent::Delete(deleted) if path::is_within(&context.target.path, deleted) => {
                self.hide(host, id);
            }
            VaultEvent::Rename { path: new_path, old_path } => {
                if let Some(rebased) = path::rebase(&context.target.path, old_path, new_path) {
                    context.target.path = rebased;
                }
            }
            _ => {}
        }
    }
}
