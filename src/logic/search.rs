//! Type-ahead Search Logic
//!
//! Pure functions for matching a typed buffer against menu item titles.
//! Matching is case-insensitive and diacritic-insensitive: both sides are
//! decomposed (NFD) and stripped of combining marks before comparison.

use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Fold text for comparison (lowercase, accents removed)
///
/// # Examples
/// ```
/// use quick_explorer::logic::search::fold;
///
/// assert_eq!(fold("Café"), "cafe");
/// assert_eq!(fold("ÅNGSTRÖM"), "angstrom");
/// ```
pub fn fold(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Build the three search patterns for a buffer, in precedence order
///
/// 1. title starts with the buffer
/// 2. title starts with the buffer's first char, the rest in order with gaps
/// 3. buffer chars appear in order anywhere in the title
///
/// # Returns
/// Empty when the buffer is empty
pub fn match_patterns(buffer: &str) -> Vec<Regex> {
    let parts: Vec<String> = fold(buffer)
        .chars()
        .map(|c| regex::escape(&c.to_string()))
        .collect();

    if parts.is_empty() {
        return Vec::new();
    }

    [
        format!("^{}", parts.concat()),
        format!("^{}", parts.join(".*")),
        parts.join(".*"),
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
}

/// Find the row a type-ahead buffer should select
///
/// Each pattern is tried over the whole list before falling back to the next
/// one. Scanning starts just after the current selection and wraps around;
/// rows that aren't selectable are skipped.
///
/// # Arguments
/// * `titles` - `(title, selectable)` per row
/// * `selected` - Current selection
/// * `buffer` - Typed characters
///
/// # Returns
/// Index of the first matching row, or `None` if nothing matches
///
/// # Examples
/// ```
/// use quick_explorer::logic::search::find_match;
///
/// let rows = vec![
///     ("Apple".to_string(), true),
///     ("Banana".to_string(), true),
///     ("Avocado".to_string(), true),
/// ];
/// assert_eq!(find_match(&rows, Some(0), "av"), Some(2));
/// assert_eq!(find_match(&rows, Some(0), "bn"), Some(1)); // gapped prefix
/// assert_eq!(find_match(&rows, Some(0), "nn"), Some(1)); // anywhere
/// assert_eq!(find_match(&rows, Some(0), "xyz"), None);
/// ```
pub fn find_match(titles: &[(String, bool)], selected: Option<usize>, buffer: &str) -> Option<usize> {
    let len = titles.len();
    if len == 0 {
        return None;
    }

    let folded: Vec<String> = titles.iter().map(|(title, _)| fold(title)).collect();
    let start = selected.map_or(0, |s| (s + 1) % len);

    for pattern in match_patterns(buffer) {
        let found = (0..len)
            .map(|offset| (start + offset) % len)
            .find(|&idx| titles[idx].1 && pattern.is_match(&folded[idx]));
        if found.is_some() {
            return found;
        }
    }

    None
}
