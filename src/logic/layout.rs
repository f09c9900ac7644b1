//! Layout calculation logic
//!
//! Pure geometry for positioning popup menus and preview popovers inside a
//! viewport. Units are whatever the host measures in (pixels for a desktop
//! host, cells for the terminal frontend).

/// A point in viewport coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle (left/top inclusive, right/bottom exclusive)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self { left, top, width, height }
    }

    pub fn at(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn right(&self) -> i32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }

    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x < self.right() && p.y >= self.top && p.y < self.bottom()
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// Rendered dimensions of a menu as measured by the host
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MenuMetrics {
    pub width: i32,
    pub height: i32,
    /// Height of one item row
    pub row_height: i32,
    /// Chrome above the first row (and below the last)
    pub padding: i32,
}

impl MenuMetrics {
    /// Height of the scrollable item region
    pub fn view_height(&self) -> i32 {
        (self.height - 2 * self.padding).max(0)
    }
}

/// Overlap applied when cascading a menu off its target
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CascadeOptions {
    pub h_overlap: i32,
    pub v_overlap: i32,
}

impl Default for CascadeOptions {
    fn default() -> Self {
        Self {
            h_overlap: 15,
            v_overlap: 5,
        }
    }
}

/// Calculate the top-left corner for a menu cascaded off `target`
///
/// The menu opens down and to the right of the click point (or of a point a
/// third of the way across the target when opened from the keyboard).
///
/// # Rules
/// - Doesn't fit below: open above the target when the target sits near the
///   bottom of the viewport (closer than its own height, or in the lower
///   quarter), otherwise pin the menu's bottom to the viewport bottom
/// - Doesn't fit right: pin to the right edge if the menu fits entirely above
///   the target or already fit below; otherwise open leftward from the
///   target's horizontal anchor so part of the target stays visible
///
/// # Examples
/// ```
/// use quick_explorer::logic::layout::{cascade_position, CascadeOptions, Point, Rect, Size};
///
/// let viewport = Size::new(800, 600);
/// let target = Rect::new(100, 10, 90, 20);
/// let menu = Size::new(200, 300);
///
/// // Keyboard-triggered: a third of the way across the target
/// let pos = cascade_position(target, None, menu, viewport, CascadeOptions::default());
/// assert_eq!(pos, Point::new(130, 25));
///
/// // Mouse-triggered: just left of the click point
/// let click = Point::new(150, 20);
/// let pos = cascade_position(target, Some(click), menu, viewport, CascadeOptions::default());
/// assert_eq!(pos, Point::new(135, 25));
/// ```
pub fn cascade_position(
    target: Rect,
    click: Option<Point>,
    menu: Size,
    viewport: Size,
    opts: CascadeOptions,
) -> Point {
    let center_x = target.left + (target.width / 3).min(150);
    let anchor_x = click.map_or(center_x, |p| p.x - opts.h_overlap);
    let anchor_y = target.bottom() - opts.v_overlap;

    let fits_below = anchor_y + menu.height <= viewport.height;
    let fits_right = anchor_x + menu.width <= viewport.width;

    let y = if fits_below {
        anchor_y
    } else {
        let near_bottom = target.bottom() > viewport.height - target.height;
        let lower_quarter = target.top * 4 >= viewport.height * 3;
        if near_bottom || lower_quarter {
            // Above the target, so the target stays visible
            target.top + opts.v_overlap - menu.height
        } else {
            viewport.height - menu.height
        }
    };

    let x = if fits_right {
        anchor_x
    } else if menu.height < anchor_y || fits_below {
        viewport.width - menu.width
    } else if center_x + menu.width > viewport.width {
        center_x - menu.width
    } else {
        center_x
    };

    Point::new(x.max(0), y.max(0))
}

/// Calculate the scroll offset that brings an item row into view
///
/// Scrolls the minimum amount: up when the item's top is above the view,
/// down when its bottom is below it, otherwise unchanged.
///
/// # Examples
/// ```
/// use quick_explorer::logic::layout::scroll_into_view;
///
/// // Already visible
/// assert_eq!(scroll_into_view(20, 30, 0, 100), 0);
/// // Above the view
/// assert_eq!(scroll_into_view(20, 30, 50, 100), 20);
/// // Below the view
/// assert_eq!(scroll_into_view(140, 150, 0, 100), 50);
/// ```
pub fn scroll_into_view(item_top: i32, item_bottom: i32, scroll_top: i32, view_height: i32) -> i32 {
    if item_top < scroll_top {
        item_top
    } else if item_bottom > scroll_top + view_height {
        item_bottom - view_height
    } else {
        scroll_top
    }
}

/// Calculate where a preview popover goes next to its menu
///
/// The popover sits flush against the menu's right edge, vertically centered
/// on the selected row and clamped to the viewport. If it doesn't fit on the
/// right and the menu isn't flush with the left edge, it flips to the left.
///
/// # Examples
/// ```
/// use quick_explorer::logic::layout::{popover_position, Point, Rect, Size};
///
/// let viewport = Size::new(800, 600);
/// let menu = Rect::new(100, 100, 200, 300);
/// let row = Rect::new(100, 200, 200, 20);
/// let pos = popover_position(menu, Some(row), Size::new(300, 200), viewport);
/// assert_eq!(pos, Point::new(300, 110));
///
/// // Too wide for the right side: flip left
/// let menu = Rect::new(500, 100, 200, 300);
/// let pos = popover_position(menu, Some(row), Size::new(300, 200), viewport);
/// assert_eq!(pos, Point::new(200, 110));
/// ```
pub fn popover_position(menu: Rect, row: Option<Rect>, popover: Size, viewport: Size) -> Point {
    let center_y = row.map_or(menu.top + menu.height / 2, |r| r.top + r.height / 2);
    let max_y = (viewport.height - popover.height).max(0);
    let y = (center_y - popover.height / 2).clamp(0, max_y);

    let mut x = menu.right();
    if x + popover.width > viewport.width && menu.left > 0 {
        x = (menu.left - popover.width).max(0);
    }

    Point::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size {
        width: 800,
        height: 600,
    };

    #[test]
    fn test_rect_contains_is_half_open() {
        let r = Rect::new(10, 10, 5, 5);
        assert!(r.contains(Point::new(10, 10)));
        assert!(r.contains(Point::new(14, 14)));
        assert!(!r.contains(Point::new(15, 10)));
        assert!(!r.contains(Point::new(10, 15)));
    }

    #[test]
    fn test_cascade_pins_to_bottom_when_target_is_high() {
        // Target near the top, menu taller than the space below it
        let target = Rect::new(100, 100, 100, 20);
        let pos = cascade_position(target, None, Size::new(150, 550), VIEWPORT, CascadeOptions::default());
        assert_eq!(pos.y, 600 - 550);
        assert!(pos.y + 550 <= VIEWPORT.height);
    }

    #[test]
    fn test_cascade_flips_above_target_in_lower_quarter() {
        let target = Rect::new(100, 500, 100, 20);
        let menu = Size::new(150, 200);
        let pos = cascade_position(target, None, menu, VIEWPORT, CascadeOptions::default());
        assert!(pos.y <= VIEWPORT.height);
        assert!(pos.y < target.top);
        assert_eq!(pos.y, 500 + 5 - 200);
    }

    #[test]
    fn test_cascade_exact_fit_stays_below() {
        // Lower quarter, but the menu ends exactly on the viewport bottom
        let target = Rect::new(100, 500, 100, 20);
        let pos = cascade_position(target, None, Size::new(150, 85), VIEWPORT, CascadeOptions::default());
        assert_eq!(pos.y, 515);
    }

    #[test]
    fn test_cascade_flips_above_when_target_closer_than_its_height() {
        let target = Rect::new(0, 560, 100, 30);
        let pos = cascade_position(target, None, Size::new(100, 100), VIEWPORT, CascadeOptions::default());
        assert!(pos.y < target.top);
    }

    #[test]
    fn test_cascade_pins_right_when_menu_fits_below() {
        let target = Rect::new(700, 10, 90, 20);
        let menu = Size::new(200, 100);
        let pos = cascade_position(target, None, menu, VIEWPORT, CascadeOptions::default());
        assert_eq!(pos.x, 600);
    }

    #[test]
    fn test_cascade_uses_center_when_menu_neither_fits_below_nor_above() {
        // Tall menu, target near the top and right edge
        let target = Rect::new(690, 10, 90, 20);
        let menu = Size::new(200, 590);
        let pos = cascade_position(target, Some(Point::new(750, 20)), menu, VIEWPORT, CascadeOptions::default());
        // center_x = 690 + 30 = 720, opens leftward from there
        assert_eq!(pos.x, 520);
    }

    #[test]
    fn test_cascade_never_negative() {
        let target = Rect::new(0, 590, 10, 10);
        let pos = cascade_position(target, None, Size::new(900, 900), VIEWPORT, CascadeOptions::default());
        assert!(pos.x >= 0);
        assert!(pos.y >= 0);
    }

    #[test]
    fn test_popover_clamped_to_viewport() {
        let menu = Rect::new(0, 0, 100, 600);
        let row = Rect::new(0, 590, 100, 10);
        let pos = popover_position(menu, Some(row), Size::new(300, 200), VIEWPORT);
        assert_eq!(pos.y, 400);
    }

    #[test]
    fn test_popover_stays_right_when_menu_flush_left() {
        let menu = Rect::new(0, 0, 700, 100);
        let pos = popover_position(menu, None, Size::new(300, 50), VIEWPORT);
        assert_eq!(pos.x, 700);
    }

    #[test]
    fn test_metrics_view_height() {
        let m = MenuMetrics {
            width: 10,
            height: 12,
            row_height: 1,
            padding: 1,
        };
        assert_eq!(m.view_height(), 10);
    }
}
