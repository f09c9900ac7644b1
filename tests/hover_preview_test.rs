//! Hover previews owned by folder menus

mod common;

use common::{later, MockHost};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use quick_explorer::logic::layout::{Rect, Size};
use quick_explorer::menu::{CascadeTarget, Parent};
use quick_explorer::{AutoPreview, Entry, HoverPopover, MenuId, MenuTree};

fn open_visible(host: &mut MockHost, tree: &mut MenuTree) -> MenuId {
    let id = tree.open_folder_menu(host, Parent::Root, Entry::root(), None, None);
    let target = CascadeTarget {
        rect: Rect::new(0, 0, 10, 1),
        anchor: None,
    };
    tree.cascade(host, id, target, None, None);
    id
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

#[test]
fn test_preview_waits_for_selection_to_settle() {
    let mut host = MockHost::new(&["a.md", "b.md", "c.md"]);
    let mut tree = MenuTree::new(AutoPreview::new(true));
    let id = open_visible(&mut host, &mut tree);
    let start = tree.now();

    tree.on_arrow_down(&mut host, id);
    tree.on_arrow_down(&mut host, id);
    tree.tick(&mut host, later(start, 20));
    assert!(host.calls("request:").is_empty());

    tree.tick(&mut host, later(start, 60));
    assert_eq!(host.calls("request:"), vec!["request:c.md"]);
    let popover = tree.hover_popover(id).unwrap();
    assert_eq!(popover.path, "c.md");
    assert!(popover.auto);
    assert!(popover.position.is_none());

    // Positioned on the following frame
    tree.tick(&mut host, later(start, 61));
    let position = tree.hover_popover(id).unwrap().position.unwrap();
    assert!(position.x >= tree.menu(id).unwrap().rect.right());
}

#[test]
fn test_previous_preview_hides_before_next_request() {
    let mut host = MockHost::new(&["a.md", "b.md"]);
    let mut tree = MenuTree::new(AutoPreview::new(true));
    let id = open_visible(&mut host, &mut tree);
    let start = tree.now();
    tree.tick(&mut host, later(start, 60));
    assert_eq!(host.calls("request:"), vec!["request:a.md"]);

    tree.on_arrow_down(&mut host, id);
    tree.tick(&mut host, later(start, 200));

    let hide = host.log.iter().position(|l| l == "hide:a.md").unwrap();
    let request = host.log.iter().position(|l| l == "request:b.md").unwrap();
    assert!(hide < request);
    assert_eq!(tree.hover_popover(id).unwrap().path, "b.md");
}

#[test]
fn test_folder_previews_its_note() {
    let mut host = MockHost::new(&["Projects/Projects.md", "Plain/x.md"]);
    let mut tree = MenuTree::new(AutoPreview::new(true));
    let id = open_visible(&mut host, &mut tree);
    let start = tree.now();

    tree.tick(&mut host, later(start, 60));
    assert!(host.calls("request:").is_empty());

    tree.on_arrow_down(&mut host, id);
    tree.tick(&mut host, later(start, 200));
    assert_eq!(host.calls("request:"), vec!["request:Projects/Projects.md"]);
}

#[test]
fn test_no_preview_while_auto_preview_is_off() {
    let mut host = MockHost::new(&["a.md", "b.md"]);
    let mut tree = MenuTree::new(AutoPreview::new(false));
    let id = open_visible(&mut host, &mut tree);
    let start = tree.now();

    tree.on_arrow_down(&mut host, id);
    tree.tick(&mut host, later(start, 200));
    assert!(host.calls("request:").is_empty());

    // Tab turns it on for every menu sharing the toggle
    tree.handle_key(&mut host, key(KeyCode::Tab), later(start, 300));
    assert!(tree.auto_preview().get());
    tree.tick(&mut host, later(start, 400));
    assert_eq!(host.calls("request:"), vec!["request:b.md"]);

    tree.handle_key(&mut host, key(KeyCode::Tab), later(start, 500));
    assert!(!tree.auto_preview().get());
    assert!(tree.hover_popover(id).is_none());
    assert_eq!(host.calls("hide:"), vec!["hide:b.md"]);
}

#[test]
fn test_opening_child_hides_parent_preview() {
    let mut host = MockHost::new(&["Projects/x.md", "a.md"]);
    let mut tree = MenuTree::new(AutoPreview::new(true));
    let id = open_visible(&mut host, &mut tree);
    let start = tree.now();

    tree.on_end(&mut host, id);
    tree.tick(&mut host, later(start, 60));
    assert_eq!(tree.hover_popover(id).unwrap().path, "a.md");

    tree.on_home(&mut host, id);
    tree.on_arrow_right(&mut host, id);
    assert!(tree.menu(id).unwrap().child.is_some());
    assert!(tree.hover_popover(id).is_none());
    assert!(!tree.can_show_popover(id));
    assert_eq!(host.calls("hide:"), vec!["hide:a.md"]);

    // A late timer can't bring it back while the child is open
    tree.tick(&mut host, later(start, 500));
    assert!(tree.hover_popover(id).is_none());
}

#[test]
fn test_hidden_menu_refuses_popover() {
    let mut host = MockHost::new(&["a.md"]);
    let mut tree = MenuTree::new(AutoPreview::new(true));
    let id = tree.open_folder_menu(&mut host, Parent::Root, Entry::root(), None, None);

    let popover = HoverPopover::new(99, "a.md", Size::new(40, 10));
    tree.set_hover_popover(&mut host, id, Some(popover));
    assert!(tree.hover_popover(id).is_none());
    assert_eq!(host.calls("hide:"), vec!["hide:a.md"]);
}

#[test]
fn test_pinned_preview_is_released_on_hide() {
    let mut host = MockHost::new(&["a.md"]);
    let mut tree = MenuTree::new(AutoPreview::new(false));
    let id = open_visible(&mut host, &mut tree);

    let mut popover = HoverPopover::new(7, "a.md", Size::new(40, 10));
    popover.pinned = true;
    tree.set_hover_popover(&mut host, id, Some(popover));
    assert!(tree.hover_popover(id).is_some());

    tree.hide(&mut host, id);
    assert_eq!(host.calls("release:"), vec!["release:a.md"]);
    assert!(host.calls("hide:").is_empty());
}

#[test]
fn test_arrow_right_focuses_editable_preview() {
    let mut host = MockHost::new(&["a.md"]);
    let mut tree = MenuTree::new(AutoPreview::new(true));
    let id = open_visible(&mut host, &mut tree);
    let start = tree.now();
    tree.tick(&mut host, later(start, 60));

    tree.on_arrow_right(&mut host, id);
    assert_eq!(host.calls("activate:"), vec!["activate:a.md:true:true"]);
    assert!(!tree.has_open_menus());
}

#[test]
fn test_page_keys_scroll_preview_then_move_on() {
    let mut host = MockHost::new(&["a.md", "b.md"]);
    let mut tree = MenuTree::new(AutoPreview::new(true));
    let id = open_visible(&mut host, &mut tree);
    let start = tree.now();
    tree.tick(&mut host, later(start, 60));
    tree.tick(&mut host, later(start, 61));
    tree.popover_loaded("a.md", 25);

    tree.handle_key(&mut host, key(KeyCode::PageDown), later(start, 70));
    assert_eq!(tree.hover_popover(id).unwrap().scroll.top, 10);
    tree.handle_key(&mut host, key(KeyCode::PageDown), later(start, 80));
    assert_eq!(tree.hover_popover(id).unwrap().scroll.top, 15);

    let to_top = KeyEvent::new(KeyCode::Home, KeyModifiers::CONTROL);
    tree.handle_key(&mut host, to_top, later(start, 90));
    assert_eq!(tree.hover_popover(id).unwrap().scroll.top, 0);

    let to_end = KeyEvent::new(KeyCode::End, KeyModifiers::CONTROL);
    tree.handle_key(&mut host, to_end, later(start, 100));
    assert_eq!(tree.hover_popover(id).unwrap().scroll.top, 15);

    // Content exhausted: the selection moves instead
    tree.handle_key(&mut host, key(KeyCode::PageDown), later(start, 110));
    assert_eq!(tree.menu(id).unwrap().selected, Some(1));
}
