//! Ignore pattern matching
//!
//! Decides which vault paths are hidden from listings. Patterns are globs:
//! - Patterns starting with `/` are anchored at the vault root
//! - Patterns without `/` match the full path or any single path component
//!
//! A path is hidden when it or any folder above it matches.

use super::path::{ancestors, ROOT};

/// Check if a vault path matches one ignore pattern
///
/// # Examples
/// ```
/// use quick_explorer::logic::ignore::pattern_matches;
///
/// assert!(pattern_matches("/Archive", "Archive"));
/// assert!(!pattern_matches("/Archive", "Notes/Archive"));
/// assert!(pattern_matches("*.tmp", "Notes/draft.tmp"));
/// assert!(pattern_matches("node_modules", "code/node_modules/x.js"));
/// ```
pub fn pattern_matches(pattern: &str, path: &str) -> bool {
    let pattern = pattern.trim();
    let path = path.trim_start_matches('/');
    if pattern.is_empty() {
        return false;
    }

    if let Some(anchored) = pattern.strip_prefix('/') {
        return anchored == path
            || glob::Pattern::new(anchored).is_ok_and(|p| p.matches(path));
    }

    let Ok(glob) = glob::Pattern::new(pattern) else {
        return pattern == path;
    };
    glob.matches(path) || path.split('/').any(|component| glob.matches(component))
}

/// Check a path and each of its ancestors against every pattern
///
/// # Examples
/// ```
/// use quick_explorer::logic::ignore::is_ignored;
///
/// let patterns = vec!["/Archive".to_string()];
/// assert!(is_ignored(&patterns, "Archive/2023/old.md"));
/// assert!(!is_ignored(&patterns, "Notes/old.md"));
/// ```
pub fn is_ignored(patterns: &[String], path: &str) -> bool {
    if patterns.is_empty() {
        return false;
    }
    ancestors(path)
        .iter()
        .filter(|p| p.as_str() != ROOT)
        .any(|p| patterns.iter().any(|pattern| pattern_matches(pattern, p)))
}

/// Split patterns into valid and invalid ones
///
/// # Returns
/// `(valid, invalid)`
pub fn validate_patterns(patterns: &[String]) -> (Vec<String>, Vec<String>) {
    patterns
        .iter()
        .cloned()
        .partition(|p| glob::Pattern::new(p.trim().trim_start_matches('/')).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_match() {
        assert!(pattern_matches(".trash", "a/.trash/b.md"));
        assert!(!pattern_matches(".trash", "a/trash/b.md"));
    }

    #[test]
    fn test_anchored_glob() {
        assert!(pattern_matches("/tmp*", "tmp-files"));
        assert!(!pattern_matches("/tmp*", "a/tmp-files"));
    }

    #[test]
    fn test_blank_pattern_matches_nothing() {
        assert!(!pattern_matches("  ", "anything"));
    }

    #[test]
    fn test_is_ignored_any() {
        let patterns = vec!["*.bak".to_string(), "/Private".to_string()];
        assert!(is_ignored(&patterns, "Private"));
        assert!(is_ignored(&patterns, "x/y.bak"));
        assert!(!is_ignored(&patterns, "x/y.md"));
        assert!(is_ignored(&patterns, "Private/deep/note.md"));
    }

    #[test]
    fn test_validate_patterns() {
        let patterns = vec!["*.md".to_string(), "[".to_string()];
        let (valid, invalid) = validate_patterns(&patterns);
        assert_eq!(valid, vec!["*.md".to_string()]);
        assert_eq!(invalid, vec!["[".to_string()]);
    }
}
