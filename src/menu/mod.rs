//! Popup Menus
//!
//! Every open menu lives in one arena (`MenuTree`) keyed by `MenuId`. A menu
//! knows its parent (another menu, or the root of a chain) and at most one
//! open child; the chain of open menus is walked through those ids.
//!
//! The base behaviour (selection, keyboard navigation, type-ahead, cascade
//! positioning, hide) lives here. Folder listings and the hover preview live
//! in `folder` and `popover`, file actions in `context`, key bindings in
//! `keys`.

mod context;
mod folder;
mod keys;
mod popover;

pub use context::FileAction;
pub use keys::is_mod;

use std::cell::Cell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::time::Instant;

use crossterm::event::KeyModifiers;

use crate::host::{Entry, Host, HoverPopover, VaultEvent};
use crate::log_debug;
use crate::logic::debounce::{Debouncer, MATCH_RESET_DELAY};
use crate::logic::layout::{
    cascade_position, scroll_into_view, CascadeOptions, MenuMetrics, Point, Rect, Size,
};
use crate::logic::navigation::{next_selectable, prev_selectable};
use crate::logic::search::find_match;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MenuId(u64);

impl fmt::Display for MenuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "menu#{}", self.0)
    }
}

/// What a menu hangs off
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Parent {
    /// Top of a chain, owned by the app
    Root,
    Menu(MenuId),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ItemKind {
    Entry(Entry),
    Action(FileAction),
    Separator,
}

/// One row in a popup menu
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuItem {
    pub title: String,
    pub icon: String,
    pub disabled: bool,
    pub kind: ItemKind,
    /// Short text shown at the right edge (file count, extension)
    pub badge: Option<String>,
    pub draggable: bool,
    pub selected: bool,
    /// Marked while a menu cascaded from this row is open
    pub active: bool,
}

impl MenuItem {
    pub fn new(title: impl Into<String>, icon: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            title: title.into(),
            icon: icon.into(),
            disabled: false,
            kind,
            badge: None,
            draggable: false,
            selected: false,
            active: false,
        }
    }

    pub fn separator() -> Self {
        Self {
            disabled: true,
            ..Self::new("", "", ItemKind::Separator)
        }
    }

    pub fn entry(&self) -> Option<&Entry> {
        match &self.kind {
            ItemKind::Entry(entry) => Some(entry),
            _ => None,
        }
    }

    pub fn is_separator(&self) -> bool {
        self.kind == ItemKind::Separator
    }

    pub fn is_selectable(&self) -> bool {
        !self.disabled && !self.is_separator()
    }
}

/// The element a menu was cascaded from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetRef {
    Crumb(usize),
    Item(MenuId, usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CascadeTarget {
    pub rect: Rect,
    pub anchor: Option<TargetRef>,
}

pub type CloseHook = Box<dyn FnOnce(&mut dyn Host)>;

/// A mouse click: where it landed and which modifiers were held
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Click {
    pub point: Point,
    pub modifiers: KeyModifiers,
}

/// What invoking an item did to the chain
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemOutcome {
    /// Terminal action; the chain is (or should be) closed
    Close,
    /// Drilled down, or refused; keep the chain open
    KeepOpen,
}

/// Work the tree can't do itself and hands back to its owner
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreeRequest {
    /// Open the breadcrumb `step` places away from `crumb`
    OpenCrumb { crumb: usize, step: isize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum TimerKind {
    ShowPopover,
    RefreshFiles,
    ResetMatch,
}

/// In-memory preview toggle shared by every menu that holds a clone
#[derive(Clone, Debug, Default)]
pub struct AutoPreview(Rc<Cell<bool>>);

impl AutoPreview {
    pub fn new(enabled: bool) -> Self {
        Self(Rc::new(Cell::new(enabled)))
    }

    pub fn get(&self) -> bool {
        self.0.get()
    }

    pub fn set(&self, enabled: bool) {
        self.0.set(enabled);
    }

    /// Flip the flag, returning the new value
    pub fn toggle(&self) -> bool {
        let enabled = !self.get();
        self.set(enabled);
        enabled
    }
}

#[derive(Debug, Clone)]
pub struct FolderMenu {
    pub folder: Entry,
    /// Row that was current when this menu was opened
    pub selected_file: Option<String>,
    /// Breadcrumb this menu stands for, when it is the root of a chain
    pub crumb: Option<usize>,
    pub(crate) popover: Option<HoverPopover>,
}

impl FolderMenu {
    pub fn popover(&self) -> Option<&HoverPopover> {
        self.popover.as_ref()
    }
}

#[derive(Debug, Clone)]
pub struct ContextMenu {
    pub target: Entry,
}

#[derive(Debug, Clone)]
pub enum MenuKind {
    Folder(FolderMenu),
    Context(ContextMenu),
}

pub struct Menu {
    pub id: MenuId,
    pub parent: Parent,
    pub child: Option<MenuId>,
    pub items: Vec<MenuItem>,
    pub selected: Option<usize>,
    /// Type-ahead buffer
    pub match_buffer: String,
    pub visible: bool,
    pub rect: Rect,
    pub metrics: MenuMetrics,
    pub scroll_top: i32,
    pub kind: MenuKind,
    target: Option<TargetRef>,
    on_close: Option<CloseHook>,
}

impl fmt::Debug for Menu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Menu")
            .field("id", &self.id)
            .field("parent", &self.parent)
            .field("child", &self.child)
            .field("items", &self.items.len())
            .field("selected", &self.selected)
            .field("visible", &self.visible)
            .field("rect", &self.rect)
            .field("kind", &self.kind)
            .finish()
    }
}

impl Menu {
    pub fn folder(&self) -> Option<&FolderMenu> {
        match &self.kind {
            MenuKind::Folder(folder) => Some(folder),
            MenuKind::Context(_) => None,
        }
    }

    pub fn is_folder(&self) -> bool {
        self.folder().is_some()
    }

    pub fn target(&self) -> Option<TargetRef> {
        self.target
    }

    pub fn selected_item(&self) -> Option<&MenuItem> {
        self.selected.and_then(|i| self.items.get(i))
    }

    fn selectable(&self) -> Vec<bool> {
        self.items.iter().map(MenuItem::is_selectable).collect()
    }

    fn rows(&self) -> Vec<(String, bool)> {
        self.items
            .iter()
            .map(|item| (item.title.clone(), item.is_selectable()))
            .collect()
    }

    fn row_height(&self) -> i32 {
        self.metrics.row_height.max(1)
    }

    fn max_scroll(&self) -> i32 {
        (self.items.len() as i32 * self.row_height() - self.metrics.view_height()).max(0)
    }

    fn scroll_to(&mut self, index: usize) {
        let row = self.row_height();
        let top = index as i32 * row;
        self.scroll_top =
            scroll_into_view(top, top + row, self.scroll_top, self.metrics.view_height())
                .clamp(0, self.max_scroll());
    }

    fn mark_selected(&mut self, index: Option<usize>) {
        for (i, item) in self.items.iter_mut().enumerate() {
            item.selected = Some(i) == index;
        }
        self.selected = index;
    }
}

/// Arena of every open popup menu
pub struct MenuTree {
    menus: HashMap<MenuId, Menu>,
    roots: Vec<MenuId>,
    next_id: u64,
    timers: Debouncer<(MenuId, TimerKind)>,
    frame_tasks: Vec<MenuId>,
    requests: Vec<TreeRequest>,
    auto_preview: AutoPreview,
    options: CascadeOptions,
    now: Instant,
}

impl fmt::Debug for MenuTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuTree")
            .field("roots", &self.roots)
            .field("menus", &self.menus.len())
            .field("auto_preview", &self.auto_preview.get())
            .finish()
    }
}

impl MenuTree {
    pub fn new(auto_preview: AutoPreview) -> Self {
        Self {
            menus: HashMap::new(),
            roots: Vec::new(),
            next_id: 1,
            timers: Debouncer::new(),
            frame_tasks: Vec::new(),
            requests: Vec::new(),
            auto_preview,
            options: CascadeOptions::default(),
            now: Instant::now(),
        }
    }

    pub fn with_options(mut self, options: CascadeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn auto_preview(&self) -> &AutoPreview {
        &self.auto_preview
    }

    pub fn now(&self) -> Instant {
        self.now
    }

    /// Advance the tree's clock (never backwards)
    pub fn set_now(&mut self, now: Instant) {
        if now > self.now {
            self.now = now;
        }
    }

    pub fn menu(&self, id: MenuId) -> Option<&Menu> {
        self.menus.get(&id)
    }

    pub fn folder(&self, id: MenuId) -> Option<&FolderMenu> {
        self.menus.get(&id).and_then(Menu::folder)
    }

    fn folder_mut(&mut self, id: MenuId) -> Option<&mut FolderMenu> {
        match self.menus.get_mut(&id).map(|m| &mut m.kind) {
            Some(MenuKind::Folder(folder)) => Some(folder),
            _ => None,
        }
    }

    pub fn roots(&self) -> &[MenuId] {
        &self.roots
    }

    pub fn has_open_menus(&self) -> bool {
        !self.roots.is_empty()
    }

    /// A root and its open descendants, root first
    pub fn chain(&self, root: MenuId) -> Vec<MenuId> {
        let mut chain = Vec::new();
        let mut current = Some(root);
        while let Some(id) = current {
            let Some(menu) = self.menus.get(&id) else {
                break;
            };
            chain.push(id);
            current = menu.child;
        }
        chain
    }

    /// Every open menu, in paint order (roots in opening order, each chain root first)
    pub fn open_menus(&self) -> Vec<MenuId> {
        self.roots.iter().flat_map(|&root| self.chain(root)).collect()
    }

    /// The menu that receives keyboard input
    pub fn front_menu(&self) -> Option<MenuId> {
        self.roots
            .last()
            .and_then(|&root| self.chain(root).last().copied())
    }

    pub fn root_of(&self, id: MenuId) -> Option<MenuId> {
        let mut current = self.menus.get(&id)?;
        while let Parent::Menu(parent) = current.parent {
            current = self.menus.get(&parent)?;
        }
        Some(current.id)
    }

    /// Breadcrumbs currently marked by an open menu
    pub fn active_crumbs(&self) -> Vec<usize> {
        self.roots
            .iter()
            .filter_map(|id| match self.menus.get(id)?.target? {
                TargetRef::Crumb(index) => Some(index),
                TargetRef::Item(..) => None,
            })
            .collect()
    }

    pub fn take_requests(&mut self) -> Vec<TreeRequest> {
        std::mem::take(&mut self.requests)
    }

    /// When `tick` next has something to do
    pub fn next_deadline(&self) -> Option<Instant> {
        if self.frame_tasks.is_empty() {
            self.timers.next_deadline()
        } else {
            Some(self.now)
        }
    }

    /// Create an empty, not yet visible menu and link it into the tree
    pub fn create_menu(&mut self, host: &mut dyn Host, parent: Parent, kind: MenuKind) -> MenuId {
        let id = MenuId(self.next_id);
        self.next_id += 1;
        self.menus.insert(
            id,
            Menu {
                id,
                parent,
                child: None,
                items: Vec::new(),
                selected: None,
                match_buffer: String::new(),
                visible: false,
                rect: Rect::default(),
                metrics: MenuMetrics::default(),
                scroll_top: 0,
                kind,
                target: None,
                on_close: None,
            },
        );
        match parent {
            Parent::Root => self.roots.push(id),
            Parent::Menu(parent) => self.set_child_menu(host, parent, Some(id)),
        }
        log_debug(&format!("Created {} under {:?}", id, parent));
        id
    }

    pub fn add_item(&mut self, id: MenuId, item: MenuItem) {
        if let Some(menu) = self.menus.get_mut(&id) {
            menu.items.push(item);
        }
    }

    /// Replace a menu's child, hiding the previous one first
    pub fn set_child_menu(&mut self, host: &mut dyn Host, id: MenuId, child: Option<MenuId>) {
        let Some(previous) = self.menus.get(&id).map(|m| m.child) else {
            return;
        };
        if let Some(previous) = previous.filter(|p| Some(*p) != child) {
            self.hide(host, previous);
        }
        if let Some(menu) = self.menus.get_mut(&id) {
            menu.child = child;
        }
        if child.is_some() {
            self.hide_popover(host, id);
        }
    }

    /// Select a row (`None` or out of range clears the selection)
    pub fn select(&mut self, host: &mut dyn Host, id: MenuId, index: Option<usize>, scroll: bool) {
        let Some(menu) = self.menus.get_mut(&id) else {
            return;
        };
        let previous = menu.selected;
        let index = index.filter(|&i| i < menu.items.len());
        menu.mark_selected(index);
        menu.match_buffer.clear();
        if scroll {
            if let Some(i) = index {
                menu.scroll_to(i);
            }
        }

        if previous != index && menu.is_folder() {
            if self.auto_preview.get() {
                self.show_popover(id);
            } else {
                self.hide_popover(host, id);
            }
        }
    }

    pub fn on_arrow_down(&mut self, host: &mut dyn Host, id: MenuId) -> bool {
        if let Some(menu) = self.menus.get(&id) {
            let next = next_selectable(&menu.selectable(), menu.selected);
            self.select(host, id, next, true);
        }
        true
    }

    pub fn on_arrow_up(&mut self, host: &mut dyn Host, id: MenuId) -> bool {
        if let Some(menu) = self.menus.get(&id) {
            let prev = prev_selectable(&menu.selectable(), menu.selected);
            self.select(host, id, prev, true);
        }
        true
    }

    pub fn on_home(&mut self, host: &mut dyn Host, id: MenuId) -> bool {
        if let Some(menu) = self.menus.get(&id) {
            let first = next_selectable(&menu.selectable(), None);
            self.select(host, id, first, true);
        }
        true
    }

    /// Jump to the last selectable row by stepping back from past the end
    pub fn on_end(&mut self, host: &mut dyn Host, id: MenuId) -> bool {
        if let Some(menu) = self.menus.get(&id) {
            let last = prev_selectable(&menu.selectable(), Some(menu.items.len()));
            self.select(host, id, last, true);
        }
        true
    }

    /// Invoke the selected row; terminal actions close the whole chain
    pub fn on_enter(&mut self, host: &mut dyn Host, id: MenuId) -> bool {
        let Some(menu) = self.menus.get(&id) else {
            return false;
        };
        let is_context = matches!(menu.kind, MenuKind::Context(_));
        let Some(index) = menu
            .selected
            .filter(|&i| menu.items.get(i).is_some_and(MenuItem::is_selectable))
        else {
            return true;
        };

        let outcome = self.invoke_item(host, id, index, None);
        if outcome == ItemOutcome::Close || is_context {
            self.hide_chain(host, id);
        }
        true
    }

    pub fn on_escape(&mut self, host: &mut dyn Host, id: MenuId) -> bool {
        self.hide(host, id);
        true
    }

    /// Pop back one level; a root menu steps to the previous breadcrumb
    pub fn on_arrow_left(&mut self, host: &mut dyn Host, id: MenuId) -> bool {
        let Some(menu) = self.menus.get(&id) else {
            return false;
        };
        match (menu.parent, menu.folder().and_then(|f| f.crumb)) {
            (Parent::Menu(_), _) => self.hide(host, id),
            (Parent::Root, Some(crumb)) => self.requests.push(TreeRequest::OpenCrumb { crumb, step: -1 }),
            (Parent::Root, None) => {}
        }
        true
    }

    pub fn on_arrow_right(&mut self, host: &mut dyn Host, id: MenuId) -> bool {
        if self.menus.get(&id).is_some_and(Menu::is_folder) {
            self.folder_arrow_right(host, id);
        }
        true
    }

    /// Extend the type-ahead buffer with `ch` and select the best match
    ///
    /// Leading characters are dropped until the buffer matches something (or
    /// runs out), so a mistyped character doesn't wedge the search.
    pub fn on_key_down(&mut self, host: &mut dyn Host, id: MenuId, ch: char) -> bool {
        let Some(menu) = self.menus.get(&id) else {
            return false;
        };
        let rows = menu.rows();
        let mut buffer = format!("{}{}", menu.match_buffer, ch);
        let mut found = None;
        while !buffer.is_empty() {
            found = find_match(&rows, menu.selected, &buffer);
            if found.is_some() {
                break;
            }
            buffer.remove(0);
        }

        if found.is_some() {
            self.select(host, id, found, true);
        }
        if let Some(menu) = self.menus.get_mut(&id) {
            menu.match_buffer = buffer;
        }
        self.timers
            .schedule((id, TimerKind::ResetMatch), self.now, MATCH_RESET_DELAY);
        true
    }

    fn invoke_item(
        &mut self,
        host: &mut dyn Host,
        id: MenuId,
        index: usize,
        click: Option<Click>,
    ) -> ItemOutcome {
        let Some(kind) = self
            .menus
            .get(&id)
            .and_then(|m| m.items.get(index))
            .map(|item| item.kind.clone())
        else {
            return ItemOutcome::KeepOpen;
        };
        match kind {
            ItemKind::Entry(entry) => self.on_click_file(host, id, &entry, index, click),
            ItemKind::Action(action) => {
                let new_leaf = click.is_some_and(|c| is_mod(c.modifiers));
                self.run_action(host, id, &action, new_leaf)
            }
            ItemKind::Separator => ItemOutcome::KeepOpen,
        }
    }

    /// Measure a menu through the host, clamped to the viewport
    fn measure(&mut self, host: &dyn Host, id: MenuId) -> Option<MenuMetrics> {
        let viewport = host.viewport();
        let menu = self.menus.get_mut(&id)?;
        let mut metrics = host.measure_menu(&menu.items);
        metrics.width = metrics.width.min(viewport.width);
        metrics.height = metrics.height.min(viewport.height);
        menu.metrics = metrics;
        Some(metrics)
    }

    /// Re-measure after the item list changed, keeping the menu where it is
    fn relayout(&mut self, host: &dyn Host, id: MenuId) {
        let viewport = host.viewport();
        let Some(metrics) = self.measure(host, id) else {
            return;
        };
        if let Some(menu) = self.menus.get_mut(&id) {
            let top = menu.rect.top.min((viewport.height - metrics.height).max(0));
            menu.rect = Rect::new(menu.rect.left, top, metrics.width, metrics.height);
            menu.scroll_top = menu.scroll_top.clamp(0, menu.max_scroll());
        }
    }

    /// Show a menu next to `target`, biased down and to the right
    ///
    /// The target is marked active until the menu closes; `on_close` runs
    /// once, after the menu has been hidden.
    pub fn cascade(
        &mut self,
        host: &mut dyn Host,
        id: MenuId,
        target: CascadeTarget,
        click: Option<Point>,
        on_close: Option<CloseHook>,
    ) {
        let viewport = host.viewport();
        let Some(metrics) = self.measure(&*host, id) else {
            return;
        };
        let size = Size::new(metrics.width, metrics.height);
        let origin = cascade_position(target.rect, click, size, viewport, self.options);

        if let Some(TargetRef::Item(parent, index)) = target.anchor {
            if let Some(item) = self.menus.get_mut(&parent).and_then(|m| m.items.get_mut(index)) {
                item.active = true;
            }
        }

        if let Some(menu) = self.menus.get_mut(&id) {
            menu.rect = Rect::at(origin, size);
            menu.visible = true;
            menu.target = target.anchor;
            menu.on_close = on_close;
            if let Some(index) = menu.selected {
                menu.scroll_to(index);
            }
        }
        log_debug(&format!("Cascaded {} at ({}, {})", id, origin.x, origin.y));
    }

    /// Hide a menu and everything below it
    pub fn hide(&mut self, host: &mut dyn Host, id: MenuId) {
        let Some(child) = self.menus.get(&id).map(|m| m.child) else {
            return;
        };
        if let Some(child) = child {
            self.hide(host, child);
        }
        if self.menus.get(&id).is_some_and(Menu::is_folder) {
            self.set_hover_popover(host, id, None);
        }

        let Some(mut menu) = self.menus.remove(&id) else {
            return;
        };
        menu.visible = false;
        self.roots.retain(|&root| root != id);
        self.frame_tasks.retain(|&task| task != id);

        if let Some(TargetRef::Item(parent, index)) = menu.target {
            if let Some(item) = self.menus.get_mut(&parent).and_then(|m| m.items.get_mut(index)) {
                item.active = false;
            }
        }
        if let Parent::Menu(parent) = menu.parent {
            let rearm = match self.menus.get_mut(&parent) {
                Some(p) if p.child == Some(id) => {
                    p.child = None;
                    p.is_folder()
                }
                _ => false,
            };
            if rearm && self.auto_preview.get() {
                self.show_popover(parent);
            }
        }

        if let Some(on_close) = menu.on_close.take() {
            on_close(host);
        }
        log_debug(&format!("Hid {}", id));
    }

    /// Hide the whole chain `id` belongs to
    pub fn hide_chain(&mut self, host: &mut dyn Host, id: MenuId) {
        if let Some(root) = self.root_of(id) {
            self.hide(host, root);
        }
    }

    pub fn hide_all(&mut self, host: &mut dyn Host) {
        for root in self.roots.clone() {
            self.hide(host, root);
        }
    }

    /// Whether a point counts as inside a menu: its own box, its open child
    /// or its hover preview
    pub fn contains(&self, id: MenuId, point: Point) -> bool {
        let Some(menu) = self.menus.get(&id) else {
            return false;
        };
        if menu.rect.contains(point) {
            return true;
        }
        if menu.child.is_some_and(|child| self.contains(child, point)) {
            return true;
        }
        menu.folder()
            .and_then(|f| f.popover.as_ref())
            .and_then(HoverPopover::rect)
            .is_some_and(|r| r.contains(point))
    }

    /// Close every menu the pointer went down outside of, deepest first
    ///
    /// # Returns
    /// `true` if some menu still contains the point
    pub fn handle_pointer_down(&mut self, host: &mut dyn Host, point: Point) -> bool {
        let mut inside = false;
        for root in self.roots.clone() {
            for id in self.chain(root).into_iter().rev() {
                if self.contains(id, point) {
                    inside = true;
                } else {
                    self.hide(host, id);
                }
            }
        }
        inside
    }

    /// The open menu whose box is under `point`, front-most first
    pub fn menu_at(&self, point: Point) -> Option<MenuId> {
        self.open_menus()
            .into_iter()
            .rev()
            .find(|id| self.menus.get(id).is_some_and(|m| m.rect.contains(point)))
    }

    /// The row under `point`
    pub fn item_at(&self, point: Point) -> Option<(MenuId, usize)> {
        let id = self.menu_at(point)?;
        let menu = self.menus.get(&id)?;
        let offset = point.y - menu.rect.top - menu.metrics.padding;
        if offset < 0 || offset >= menu.metrics.view_height() {
            return None;
        }
        let index = ((offset + menu.scroll_top) / menu.row_height()) as usize;
        (index < menu.items.len()).then_some((id, index))
    }

    /// Screen box of a row, taking scrolling into account
    pub fn item_rect(&self, id: MenuId, index: usize) -> Option<Rect> {
        let menu = self.menus.get(&id)?;
        let row = menu.row_height();
        Some(Rect::new(
            menu.rect.left,
            menu.rect.top + menu.metrics.padding + index as i32 * row - menu.scroll_top,
            menu.rect.width,
            row,
        ))
    }

    pub fn on_item_click(&mut self, host: &mut dyn Host, id: MenuId, index: usize, click: Click) {
        let selectable = self
            .menus
            .get(&id)
            .and_then(|m| m.items.get(index))
            .is_some_and(MenuItem::is_selectable);
        if !selectable {
            return;
        }
        if self.invoke_item(host, id, index, Some(click)) == ItemOutcome::Close {
            self.hide_chain(host, id);
        }
    }

    /// Pointer moved over a row: select it without scrolling
    pub fn on_item_hover(&mut self, host: &mut dyn Host, id: MenuId, index: usize, modifiers: KeyModifiers) {
        let Some(menu) = self.menus.get(&id) else {
            return;
        };
        if !menu.items.get(index).is_some_and(MenuItem::is_selectable) {
            return;
        }
        if menu.selected != Some(index) {
            self.select(host, id, Some(index), false);
        }
        if is_mod(modifiers) && self.menus.get(&id).is_some_and(Menu::is_folder) {
            self.hide_popover(host, id);
            self.maybe_hover(host, id);
        }
    }

    pub fn on_wheel(&mut self, host: &mut dyn Host, point: Point, up: bool) -> bool {
        let Some(id) = self.menu_at(point) else {
            return false;
        };
        if up {
            self.on_arrow_up(host, id)
        } else {
            self.on_arrow_down(host, id)
        }
    }

    /// Let every open menu react to a file tree change
    pub fn on_vault_event(&mut self, host: &mut dyn Host, event: &VaultEvent) {
        // Deepest first, so children follow the change before their parent relists
        for id in self.open_menus().into_iter().rev() {
            match self.menus.get(&id).map(|m| &m.kind) {
                Some(MenuKind::Folder(_)) => self.folder_vault_event(host, id, event),
                Some(MenuKind::Context(_)) => self.context_vault_event(host, id, event),
                None => {}
            }
        }
    }

    /// Run next-frame work and fire due timers
    pub fn tick(&mut self, host: &mut dyn Host, now: Instant) {
        self.set_now(now);

        for id in std::mem::take(&mut self.frame_tasks) {
            self.position_popover(host, id);
        }

        for (id, kind) in self.timers.due(self.now) {
            match kind {
                TimerKind::ShowPopover => self.fire_show_popover(host, id),
                TimerKind::RefreshFiles => self.refresh_files(host, id),
                TimerKind::ResetMatch => {
                    if let Some(menu) = self.menus.get_mut(&id) {
                        menu.match_buffer.clear();
                    }
                }
            }
        }
    }
}
