//! Navigation selection logic
//!
//! Pure functions for stepping a menu selection over selectable rows with
//! wrapping behavior. Disabled rows and separators are skipped.

/// Calculate the next selectable index with wrapping
///
/// Scans forward from just after `current`, wrapping past the end. If no
/// item is selected, scanning starts at the first row.
///
/// # Arguments
/// * `selectable` - One flag per row, `false` for separators/disabled rows
/// * `current` - Current selection index (None if no selection)
///
/// # Returns
/// * `Some(index)` - The next selectable row
/// * `None` - If no row is selectable
///
/// # Examples
/// ```
/// use quick_explorer::logic::navigation::next_selectable;
///
/// let rows = [true, false, true];
/// assert_eq!(next_selectable(&rows, None), Some(0));
/// assert_eq!(next_selectable(&rows, Some(0)), Some(2)); // skips the separator
/// assert_eq!(next_selectable(&rows, Some(2)), Some(0)); // wraps
/// assert_eq!(next_selectable(&[false, false], None), None);
/// ```
pub fn next_selectable(selectable: &[bool], current: Option<usize>) -> Option<usize> {
    let len = selectable.len();
    if len == 0 {
        return None;
    }

    let start = match current {
        Some(i) if i + 1 >= len => 0, // Wrap to start
        Some(i) => i + 1,
        None => 0,
    };

    (0..len)
        .map(|offset| (start + offset) % len)
        .find(|&idx| selectable[idx])
}

/// Calculate the previous selectable index with wrapping
///
/// Scans backward from just before `current`, wrapping past the start. A
/// `current` at or past the end (or no selection) starts from the last row,
/// which is how "jump to end" lands on the last selectable row.
///
/// # Examples
/// ```
/// use quick_explorer::logic::navigation::prev_selectable;
///
/// let rows = [true, false, true, false];
/// assert_eq!(prev_selectable(&rows, Some(2)), Some(0));
/// assert_eq!(prev_selectable(&rows, Some(0)), Some(2)); // wraps
/// assert_eq!(prev_selectable(&rows, Some(4)), Some(2)); // past the end
/// assert_eq!(prev_selectable(&rows, None), Some(2));
/// ```
pub fn prev_selectable(selectable: &[bool], current: Option<usize>) -> Option<usize> {
    let len = selectable.len();
    if len == 0 {
        return None;
    }

    let start = match current {
        Some(0) | None => len - 1, // Wrap to end
        Some(i) if i > len => len - 1,
        Some(i) => i - 1,
    };

    (0..len)
        .map(|offset| (start + len - offset) % len)
        .find(|&idx| selectable[idx])
}
