//! Vault Path Utilities
//!
//! Vault paths are `/`-separated and relative to the vault root. The root
//! itself is spelled `"/"`; every other path has no leading slash
//! (`"Projects/2024/notes.md"`).

/// Path of the vault root folder
pub const ROOT: &str = "/";

/// Get the parent folder path of a vault path
///
/// # Returns
/// `None` for the root, `Some("/")` for top-level entries
///
/// # Examples
/// ```
/// use quick_explorer::logic::path::parent_of;
///
/// assert_eq!(parent_of("/"), None);
/// assert_eq!(parent_of("Projects").as_deref(), Some("/"));
/// assert_eq!(parent_of("Projects/2024/notes.md").as_deref(), Some("Projects/2024"));
/// ```
pub fn parent_of(path: &str) -> Option<String> {
    if path == ROOT || path.is_empty() {
        return None;
    }
    match path.rfind('/') {
        Some(idx) => Some(path[..idx].to_string()),
        None => Some(ROOT.to_string()),
    }
}

/// Last path component (empty for the root)
///
/// # Examples
/// ```
/// use quick_explorer::logic::path::name_of;
///
/// assert_eq!(name_of("Projects/2024/notes.md"), "notes.md");
/// assert_eq!(name_of("Projects"), "Projects");
/// assert_eq!(name_of("/"), "");
/// ```
pub fn name_of(path: &str) -> &str {
    if path == ROOT {
        return "";
    }
    path.rsplit('/').next().unwrap_or(path)
}

/// File name without its extension. Dotfiles keep their full name.
///
/// # Examples
/// ```
/// use quick_explorer::logic::path::stem_of;
///
/// assert_eq!(stem_of("notes.md"), "notes");
/// assert_eq!(stem_of("archive.tar.gz"), "archive.tar");
/// assert_eq!(stem_of(".hidden"), ".hidden");
/// assert_eq!(stem_of("README"), "README");
/// ```
pub fn stem_of(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    }
}

/// Lowercased extension of a file name (empty when there is none)
///
/// # Examples
/// ```
/// use quick_explorer::logic::path::extension_of;
///
/// assert_eq!(extension_of("Photo.PNG"), "png");
/// assert_eq!(extension_of("README"), "");
/// ```
pub fn extension_of(name: &str) -> String {
    match name.rfind('.') {
        Some(idx) if idx > 0 => name[idx + 1..].to_lowercase(),
        _ => String::new(),
    }
}

/// Join a folder path and a child name
///
/// # Examples
/// ```
/// use quick_explorer::logic::path::join;
///
/// assert_eq!(join("/", "Projects"), "Projects");
/// assert_eq!(join("Projects", "2024"), "Projects/2024");
/// ```
pub fn join(folder: &str, name: &str) -> String {
    if folder == ROOT || folder.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", folder.trim_end_matches('/'), name)
    }
}

/// All ancestors of a path, root first, the path itself last
///
/// # Examples
/// ```
/// use quick_explorer::logic::path::ancestors;
///
/// assert_eq!(ancestors("a/b/c.md"), vec!["/", "a", "a/b", "a/b/c.md"]);
/// assert_eq!(ancestors("/"), vec!["/"]);
/// ```
pub fn ancestors(path: &str) -> Vec<String> {
    let mut parts = vec![ROOT.to_string()];
    if path == ROOT || path.is_empty() {
        return parts;
    }
    let mut current = String::new();
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        current = join(if current.is_empty() { ROOT } else { &current }, segment);
        parts.push(current.clone());
    }
    parts
}

/// Check whether `path` is a direct child of `folder`
pub fn is_child_of(path: &str, folder: &str) -> bool {
    parent_of(path).as_deref() == Some(folder)
}

/// Check whether `path` is `folder` itself or lives somewhere below it
pub fn is_within(path: &str, folder: &str) -> bool {
    if folder == ROOT {
        return true;
    }
    path == folder || path.starts_with(&format!("{}/", folder))
}

/// Rewrite `path` after `old_prefix` was renamed to `new_prefix`
///
/// # Returns
/// `None` when `path` is not inside `old_prefix`
///
/// # Examples
/// ```
/// use quick_explorer::logic::path::rebase;
///
/// assert_eq!(rebase("a/b/c.md", "a/b", "a/x").as_deref(), Some("a/x/c.md"));
/// assert_eq!(rebase("a/b", "a/b", "z").as_deref(), Some("z"));
/// assert_eq!(rebase("q/c.md", "a/b", "a/x"), None);
/// ```
pub fn rebase(path: &str, old_prefix: &str, new_prefix: &str) -> Option<String> {
    if path == old_prefix {
        return Some(new_prefix.to_string());
    }
    path.strip_prefix(&format!("{}/", old_prefix))
        .map(|rest| join(new_prefix, rest))
}
