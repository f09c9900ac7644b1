//! Folder menu listing, selection and navigation

mod common;

use common::{later, row_point, selected_title, titles, MockHost};
use crossterm::event::KeyModifiers;
use quick_explorer::logic::layout::Rect;
use quick_explorer::menu::{CascadeTarget, Click, Parent, TreeRequest};
use quick_explorer::{AutoPreview, Entry, MenuId, MenuTree};

fn tree() -> MenuTree {
    MenuTree::new(AutoPreview::new(false))
}

fn open_root(host: &mut MockHost, tree: &mut MenuTree) -> MenuId {
    tree.open_folder_menu(host, Parent::Root, Entry::root(), None, None)
}

fn show(host: &mut MockHost, tree: &mut MenuTree, id: MenuId) {
    let target = CascadeTarget {
        rect: Rect::new(0, 0, 10, 1),
        anchor: None,
    };
    tree.cascade(host, id, target, None, None);
}

fn assert_single_selection(tree: &MenuTree, id: MenuId) {
    let menu = tree.menu(id).unwrap();
    let flagged: Vec<usize> = menu
        .items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.selected)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(flagged, menu.selected.into_iter().collect::<Vec<_>>());
}

#[test]
fn test_listing_groups_folders_then_files() {
    let mut host = MockHost::new(&["b.md", "a.md", "Z/", "A/", "img.png", "x.exe"]);
    let mut tree = tree();
    let id = open_root(&mut host, &mut tree);

    assert_eq!(titles(&tree, id), vec!["A", "Z", "---", "a", "b", "img"]);
    assert_eq!(selected_title(&tree, id).as_deref(), Some("A"));

    let menu = tree.menu(id).unwrap();
    assert_eq!(menu.items[0].badge.as_deref(), Some("0"));
    assert_eq!(menu.items[5].badge.as_deref(), Some("PNG"));
    assert_eq!(menu.items[3].badge, None);
    assert!(menu.items[2].disabled);
}

#[test]
fn test_folder_note_is_listed_first() {
    let mut host = MockHost::new(&["Projects/Projects.md", "Projects/a.md", "Projects/Sub/"]);
    let mut tree = tree();
    let id = tree.open_folder_menu(&mut host, Parent::Root, Entry::folder("Projects"), None, None);

    assert_eq!(titles(&tree, id), vec!["Projects", "---", "Sub", "---", "a"]);
}

#[test]
fn test_only_files_means_no_separator() {
    let mut host = MockHost::new(&["one.md", "two.md"]);
    let mut tree = tree();
    let id = open_root(&mut host, &mut tree);
    assert_eq!(titles(&tree, id), vec!["one", "two"]);
}

#[test]
fn test_selected_file_is_preselected() {
    let mut host = MockHost::new(&["Notes/a.md", "Notes/b.md", "Notes/c.md"]);
    let mut tree = tree();
    let id = tree.open_folder_menu(
        &mut host,
        Parent::Root,
        Entry::folder("Notes"),
        Some("Notes/b.md".to_string()),
        None,
    );
    assert_eq!(selected_title(&tree, id).as_deref(), Some("b"));
}

#[test]
fn test_arrows_skip_separators_and_wrap() {
    let mut host = MockHost::new(&["b.md", "a.md", "Z/", "A/", "img.png"]);
    let mut tree = tree();
    let id = open_root(&mut host, &mut tree);

    tree.on_arrow_down(&mut host, id);
    assert_eq!(selected_title(&tree, id).as_deref(), Some("Z"));
    tree.on_arrow_down(&mut host, id);
    assert_eq!(selected_title(&tree, id).as_deref(), Some("a"));
    tree.on_arrow_up(&mut host, id);
    assert_eq!(selected_title(&tree, id).as_deref(), Some("Z"));
    tree.on_end(&mut host, id);
    assert_eq!(selected_title(&tree, id).as_deref(), Some("img"));
    tree.on_arrow_down(&mut host, id);
    assert_eq!(selected_title(&tree, id).as_deref(), Some("A"));
    tree.on_arrow_up(&mut host, id);
    assert_eq!(selected_title(&tree, id).as_deref(), Some("img"));
    tree.on_home(&mut host, id);
    assert_eq!(selected_title(&tree, id).as_deref(), Some("A"));
    assert_single_selection(&tree, id);
}

#[test]
fn test_select_out_of_range_clears_selection() {
    let mut host = MockHost::new(&["a.md"]);
    let mut tree = tree();
    let id = open_root(&mut host, &mut tree);
    tree.select(&mut host, id, Some(10), true);
    assert_eq!(tree.menu(id).unwrap().selected, None);
    assert_single_selection(&tree, id);
}

#[test]
fn test_type_ahead_finds_and_resets() {
    let mut host = MockHost::new(&["Apple.md", "Banana.md", "Avocado.md"]);
    let mut tree = tree();
    let id = open_root(&mut host, &mut tree);
    let start = tree.now();
    assert_eq!(titles(&tree, id), vec!["Apple", "Avocado", "Banana"]);

    // Scanning starts after the current row
    tree.on_key_down(&mut host, id, 'a');
    assert_eq!(selected_title(&tree, id).as_deref(), Some("Avocado"));
    tree.on_key_down(&mut host, id, 'v');
    assert_eq!(selected_title(&tree, id).as_deref(), Some("Avocado"));
    assert_eq!(tree.menu(id).unwrap().match_buffer, "av");

    // Nothing matches "avb", so leading chars drop until "b" does
    tree.on_key_down(&mut host, id, 'b');
    assert_eq!(selected_title(&tree, id).as_deref(), Some("Banana"));
    assert_eq!(tree.menu(id).unwrap().match_buffer, "b");

    tree.tick(&mut host, later(start, 1000));
    assert_eq!(tree.menu(id).unwrap().match_buffer, "b");
    tree.tick(&mut host, later(start, 1600));
    assert_eq!(tree.menu(id).unwrap().match_buffer, "");
}

#[test]
fn test_child_menu_marks_and_clears_active_row() {
    let mut host = MockHost::new(&["Projects/a.md", "Inbox.md"]);
    let mut tree = tree();
    let id = open_root(&mut host, &mut tree);
    show(&mut host, &mut tree, id);

    tree.on_arrow_right(&mut host, id);
    let child = tree.menu(id).unwrap().child.unwrap();
    assert_eq!(tree.chain(id), vec![id, child]);
    assert!(tree.menu(id).unwrap().items[0].active);
    assert_eq!(titles(&tree, child), vec!["a"]);
    assert_eq!(tree.front_menu(), Some(child));

    tree.on_escape(&mut host, child);
    assert!(tree.menu(child).is_none());
    assert_eq!(tree.menu(id).unwrap().child, None);
    assert!(!tree.menu(id).unwrap().items[0].active);
    assert_eq!(tree.front_menu(), Some(id));
}

#[test]
fn test_opening_second_child_hides_first() {
    let mut host = MockHost::new(&["A/x.md", "B/y.md"]);
    let mut tree = tree();
    let id = open_root(&mut host, &mut tree);
    show(&mut host, &mut tree, id);

    tree.on_arrow_right(&mut host, id);
    let first = tree.menu(id).unwrap().child.unwrap();
    tree.on_arrow_down(&mut host, id);
    tree.on_arrow_right(&mut host, id);
    let second = tree.menu(id).unwrap().child.unwrap();

    assert_ne!(first, second);
    assert!(tree.menu(first).is_none());
    let items = &tree.menu(id).unwrap().items;
    assert!(!items[0].active);
    assert!(items[1].active);
    assert_eq!(titles(&tree, second), vec!["y"]);
}

#[test]
fn test_arrow_left_in_child_returns_to_parent() {
    let mut host = MockHost::new(&["A/x.md"]);
    let mut tree = tree();
    let id = open_root(&mut host, &mut tree);
    show(&mut host, &mut tree, id);
    tree.on_arrow_right(&mut host, id);
    let child = tree.menu(id).unwrap().child.unwrap();

    tree.on_arrow_left(&mut host, child);
    assert!(tree.menu(child).is_none());
    assert!(tree.menu(id).is_some());
}

#[test]
fn test_descending_into_the_next_crumb_asks_for_it() {
    let mut host = MockHost::new(&["Projects/2024/notes.md", "Projects/plan.md"]);
    let mut tree = tree();
    let id = tree.open_folder_menu(
        &mut host,
        Parent::Root,
        Entry::folder("Projects"),
        Some("Projects/2024".to_string()),
        Some(0),
    );
    tree.on_arrow_right(&mut host, id);
    assert_eq!(tree.take_requests(), vec![TreeRequest::OpenCrumb { crumb: 0, step: 1 }]);
    assert_eq!(tree.menu(id).unwrap().child, None);

    tree.on_arrow_left(&mut host, id);
    assert_eq!(tree.take_requests(), vec![TreeRequest::OpenCrumb { crumb: 0, step: -1 }]);
}

#[test]
fn test_enter_opens_file_and_closes_chain() {
    let mut host = MockHost::new(&["A/x.md"]);
    let mut tree = tree();
    let id = open_root(&mut host, &mut tree);
    show(&mut host, &mut tree, id);
    tree.on_arrow_right(&mut host, id);
    let child = tree.menu(id).unwrap().child.unwrap();

    tree.on_enter(&mut host, child);
    assert_eq!(host.opened, vec![("A/x.md".to_string(), false)]);
    assert!(!tree.has_open_menus());
}

#[test]
fn test_mod_click_opens_in_new_leaf() {
    let mut host = MockHost::new(&["a.md"]);
    let mut tree = tree();
    let id = open_root(&mut host, &mut tree);
    show(&mut host, &mut tree, id);

    let click = Click {
        point: row_point(&tree, id, 0),
        modifiers: KeyModifiers::CONTROL,
    };
    tree.on_item_click(&mut host, id, 0, click);
    assert_eq!(host.opened, vec![("a.md".to_string(), true)]);
    assert!(!tree.has_open_menus());
}

#[test]
fn test_unsupported_file_shows_notice() {
    let mut host = MockHost::new(&["tool.exe"]);
    host.show_unsupported = true;
    let mut tree = tree();
    let id = open_root(&mut host, &mut tree);
    assert_eq!(tree.menu(id).unwrap().items[0].badge.as_deref(), Some("EXE"));

    tree.on_enter(&mut host, id);
    assert!(host.opened.is_empty());
    assert_eq!(
        host.notices,
        vec!["Unsupported file type: tool.exe. Use \"Open in default app\" to open it."]
    );
    assert!(tree.menu(id).is_some());
}

#[test]
fn test_failed_open_keeps_menu() {
    let mut host = MockHost::new(&["a.md"]);
    host.fail_open = true;
    let mut tree = tree();
    let id = open_root(&mut host, &mut tree);

    tree.on_enter(&mut host, id);
    assert_eq!(host.notices, vec!["Error: cannot open a.md"]);
    assert!(tree.menu(id).is_some());
}

#[test]
fn test_item_at_maps_rows() {
    let mut host = MockHost::new(&["a.md", "b.md"]);
    let mut tree = tree();
    let id = open_root(&mut host, &mut tree);
    show(&mut host, &mut tree, id);

    assert_eq!(tree.item_at(row_point(&tree, id, 1)), Some((id, 1)));
    let rect = tree.menu(id).unwrap().rect;
    // Top border row isn't an item
    assert_eq!(tree.item_at(quick_explorer::logic::layout::Point::new(rect.left + 1, rect.top)), None);
}

#[test]
fn test_hover_selects_without_opening() {
    let mut host = MockHost::new(&["a.md", "b.md"]);
    let mut tree = tree();
    let id = open_root(&mut host, &mut tree);
    show(&mut host, &mut tree, id);

    tree.on_item_hover(&mut host, id, 1, KeyModifiers::NONE);
    assert_eq!(selected_title(&tree, id).as_deref(), Some("b"));
    assert!(host.opened.is_empty());
}

#[test]
fn test_drag_start_hands_entry_to_host() {
    let mut host = MockHost::new(&["a.md"]);
    let mut tree = tree();
    let id = open_root(&mut host, &mut tree);
    show(&mut host, &mut tree, id);

    tree.on_item_drag_start(&mut host, id, 0);
    assert_eq!(host.calls("drag:"), vec!["drag:a.md"]);
    assert!(!tree.has_open_menus());
}

#[test]
fn test_pointer_down_outside_closes_everything() {
    let mut host = MockHost::new(&["A/x.md"]);
    let mut tree = tree();
    let id = open_root(&mut host, &mut tree);
    show(&mut host, &mut tree, id);
    tree.on_arrow_right(&mut host, id);

    let inside = tree.handle_pointer_down(&mut host, quick_explorer::logic::layout::Point::new(190, 55));
    assert!(!inside);
    assert!(!tree.has_open_menus());
}

#[test]
fn test_pointer_down_in_parent_keeps_parent_only() {
    let mut host = MockHost::new(&["A/x.md", "B/y.md"]);
    let mut tree = tree();
    let id = open_root(&mut host, &mut tree);
    show(&mut host, &mut tree, id);
    tree.on_arrow_right(&mut host, id);
    let child = tree.menu(id).unwrap().child.unwrap();

    // Row B of the parent is outside the child
    let point = row_point(&tree, id, 1);
    assert!(!tree.menu(child).unwrap().rect.contains(point));
    assert!(tree.handle_pointer_down(&mut host, point));
    assert!(tree.menu(child).is_none());
    assert!(tree.menu(id).is_some());
}
