//! Breadcrumb path logic
//!
//! Pure functions for deriving the breadcrumb trail of a file and working out
//! which menu each crumb opens.

use crate::logic::path;

/// Paths shown as breadcrumbs for `file`, root-most first
///
/// The vault root is only shown on its own; as soon as there is a real
/// segment it is dropped.
///
/// # Examples
/// ```
/// use quick_explorer::logic::breadcrumb::crumb_paths;
///
/// assert_eq!(crumb_paths("Projects/2024/notes.md"), vec!["Projects", "Projects/2024", "Projects/2024/notes.md"]);
/// assert_eq!(crumb_paths("/"), vec!["/"]);
/// ```
pub fn crumb_paths(file: &str) -> Vec<String> {
    let mut parts = path::ancestors(file);
    if parts.len() > 1 {
        parts.remove(0);
    }
    parts
}

/// Count how many leading crumbs lie on the way to `target`
///
/// # Arguments
/// * `crumbs` - Current breadcrumb paths, root-most first
/// * `target` - Path being browsed to
///
/// # Returns
/// Number of crumbs matching `target`'s ancestors (or `target` itself) in order
///
/// # Examples
/// ```
/// use quick_explorer::logic::breadcrumb::{crumb_paths, matching_crumbs};
///
/// let crumbs = crumb_paths("Projects/2024/notes.md");
/// assert_eq!(matching_crumbs(&crumbs, "Projects/2024/draft.md"), 2);
/// assert_eq!(matching_crumbs(&crumbs, "Projects/2025/plan.md"), 1);
/// assert_eq!(matching_crumbs(&crumbs, "Inbox.md"), 0);
/// ```
pub fn matching_crumbs(crumbs: &[String], target: &str) -> usize {
    crumbs
        .iter()
        .zip(crumb_paths(target).iter())
        .take_while(|(crumb, part)| crumb == part)
        .count()
}

/// Folder listed by a crumb's menu, and the row pre-selected in it
///
/// A folder crumb lists its own contents with the next crumb selected; the
/// file crumb at the end lists its parent with the file selected.
///
/// # Arguments
/// * `crumbs` - `(path, is_folder)` per crumb, root-most first
/// * `index` - Crumb to open
///
/// # Returns
/// `(folder, selected)`, or `None` if `index` is out of range
///
/// # Examples
/// ```
/// use quick_explorer::logic::breadcrumb::crumb_menu_source;
///
/// let crumbs = vec![
///     ("Projects".to_string(), true),
///     ("Projects/2024".to_string(), true),
///     ("Projects/2024/notes.md".to_string(), false),
/// ];
/// assert_eq!(
///     crumb_menu_source(&crumbs, 1),
///     Some(("Projects/2024".to_string(), Some("Projects/2024/notes.md".to_string())))
/// );
/// assert_eq!(
///     crumb_menu_source(&crumbs, 2),
///     Some(("Projects/2024".to_string(), Some("Projects/2024/notes.md".to_string())))
/// );
/// assert_eq!(crumb_menu_source(&crumbs, 3), None);
/// ```
pub fn crumb_menu_source(crumbs: &[(String, bool)], index: usize) -> Option<(String, Option<String>)> {
    let (crumb, is_folder) = crumbs.get(index)?;
    if *is_folder {
        let next = crumbs.get(index + 1).map(|(p, _)| p.clone());
        Some((crumb.clone(), next))
    } else {
        let parent = path::parent_of(crumb).unwrap_or_else(|| path::ROOT.to_string());
        Some((parent, Some(crumb.clone())))
    }
}

/// The child of `folder` on the way to `target`, if `target` is below it
///
/// # Examples
/// ```
/// use quick_explorer::logic::breadcrumb::step_toward;
///
/// assert_eq!(step_toward("Projects", "Projects/2024/notes.md").as_deref(), Some("Projects/2024"));
/// assert_eq!(step_toward("/", "Inbox.md").as_deref(), Some("Inbox.md"));
/// assert_eq!(step_toward("Archive", "Projects/2024/notes.md"), None);
/// ```
pub fn step_toward(folder: &str, target: &str) -> Option<String> {
    path::ancestors(target)
        .into_iter()
        .find(|p| path::is_child_of(p, folder))
}
