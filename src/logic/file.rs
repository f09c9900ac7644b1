//! File type detection and directory listings
//!
//! Read-only helpers that classify files, sort a folder's children and find
//! a folder's note. Nothing here holds state; all lookups go through the
//! `Vault` passed in.

use crate::host::{Entry, Vault};
use crate::logic::path;
use crate::logic::sorting::compare_entries;

/// Broad file categories the host knows how to display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Folder,
    Markdown,
    Canvas,
    Image,
    Audio,
    Video,
    Pdf,
    Other,
}

/// Classify a file extension (lowercase, without the dot)
///
/// # Examples
/// ```
/// use quick_explorer::logic::file::{type_for_extension, FileType};
///
/// assert_eq!(type_for_extension("md"), FileType::Markdown);
/// assert_eq!(type_for_extension("jpeg"), FileType::Image);
/// assert_eq!(type_for_extension("exe"), FileType::Other);
/// ```
pub fn type_for_extension(ext: &str) -> FileType {
    match ext {
        "md" => FileType::Markdown,
        "canvas" => FileType::Canvas,
        "png" | "jpg" | "jpeg" | "gif" | "bmp" | "svg" | "webp" | "avif" => FileType::Image,
        "mp3" | "wav" | "m4a" | "ogg" | "3gp" | "flac" => FileType::Audio,
        "mp4" | "webm" | "ogv" | "mov" | "mkv" => FileType::Video,
        "pdf" => FileType::Pdf,
        _ => FileType::Other,
    }
}

pub fn file_type(entry: &Entry) -> FileType {
    if entry.is_folder() {
        FileType::Folder
    } else {
        type_for_extension(&entry.extension())
    }
}

/// Icon name for an entry
pub fn icon_for(entry: &Entry) -> &'static str {
    match file_type(entry) {
        FileType::Folder => "folder",
        FileType::Markdown => "document",
        FileType::Canvas => "layout-dashboard",
        FileType::Image => "image-file",
        FileType::Audio => "audio-file",
        FileType::Video => "video-file",
        FileType::Pdf => "pdf-file",
        FileType::Other => "file",
    }
}

/// Check if the host can display files with this extension
pub fn is_supported_extension(ext: &str) -> bool {
    type_for_extension(ext) != FileType::Other
}

/// Check if an entry should appear in a listing
pub fn is_listed(entry: &Entry, show_unsupported: bool) -> bool {
    entry.is_folder() || show_unsupported || is_supported_extension(&entry.extension())
}

/// Check if an entry's preview has an editable surface
pub fn has_editor(entry: &Entry) -> bool {
    matches!(file_type(entry), FileType::Markdown | FileType::Canvas)
}

/// Vault path of a folder's note (`Folder/Folder.md`); the root has none
///
/// # Examples
/// ```
/// use quick_explorer::host::Entry;
/// use quick_explorer::logic::file::folder_note_path;
///
/// assert_eq!(folder_note_path(&Entry::folder("Projects/2024")).as_deref(), Some("Projects/2024/2024.md"));
/// assert_eq!(folder_note_path(&Entry::root()), None);
/// ```
pub fn folder_note_path(folder: &Entry) -> Option<String> {
    if !folder.is_folder() || folder.is_root() {
        return None;
    }
    Some(path::join(&folder.path, &format!("{}.md", folder.name())))
}

/// Look up a folder's note, if it exists
pub fn folder_note<V: Vault + ?Sized>(vault: &V, folder: &Entry) -> Option<Entry> {
    folder_note_path(folder)
        .and_then(|p| vault.entry(&p))
        .filter(|e| !e.is_folder())
}

/// A folder's children split into display groups
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    pub note: Option<Entry>,
    pub folders: Vec<Entry>,
    pub files: Vec<Entry>,
}

impl Listing {
    pub fn len(&self) -> usize {
        self.note.iter().count() + self.folders.len() + self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// List a folder: its note pinned apart, then sorted subfolders and files
///
/// Unsupported files are left out unless the vault says to show them. The
/// folder note never also appears in `files`.
pub fn listing<V: Vault + ?Sized>(vault: &V, folder: &Entry) -> Listing {
    let show_unsupported = vault.show_unsupported_files();
    let note = folder_note(vault, folder);

    let mut children: Vec<Entry> = vault
        .children(&folder.path)
        .into_iter()
        .filter(|e| is_listed(e, show_unsupported))
        .filter(|e| note.as_ref() != Some(e))
        .collect();
    children.sort_by(compare_entries);

    let (folders, files) = children.into_iter().partition(|e| e.is_folder());
    Listing { note, folders, files }
}

/// Count supported files anywhere below a folder
pub fn supported_file_count<V: Vault + ?Sized>(vault: &V, folder: &Entry) -> usize {
    vault
        .children(&folder.path)
        .iter()
        .map(|child| {
            if child.is_folder() {
                supported_file_count(vault, child)
            } else if is_supported_extension(&child.extension()) {
                1
            } else {
                0
            }
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapVault {
        tree: HashMap<String, Vec<Entry>>,
        show_unsupported: bool,
    }

    impl MapVault {
        fn new(paths: &[&str]) -> Self {
            let mut tree: HashMap<String, Vec<Entry>> = HashMap::new();
            for p in paths {
                let entry = if p.ends_with('/') {
                    Entry::folder(p.trim_end_matches('/'))
                } else {
                    Entry::file(*p)
                };
                let parent = entry.parent_path().unwrap_or_default();
                tree.entry(parent).or_default().push(entry);
            }
            Self {
                tree,
                show_unsupported: false,
            }
        }
    }

    impl Vault for MapVault {
        fn entry(&self, path: &str) -> Option<Entry> {
            self.tree.values().flatten().find(|e| e.path == path).cloned()
        }

        fn children(&self, folder: &str) -> Vec<Entry> {
            self.tree.get(folder).cloned().unwrap_or_default()
        }

        fn show_unsupported_files(&self) -> bool {
            self.show_unsupported
        }
    }

    #[test]
    fn test_listing_groups_and_sorts() {
        let vault = MapVault::new(&["b.md", "a/", "c/", "a1.md", "A10.md", "a2.md"]);
        let listing = listing(&vault, &Entry::root());
        let folders: Vec<&str> = listing.folders.iter().map(|e| e.path.as_str()).collect();
        let files: Vec<&str> = listing.files.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(folders, vec!["a", "c"]);
        assert_eq!(files, vec!["a1.md", "a2.md", "A10.md", "b.md"]);
        assert!(listing.note.is_none());
    }

    #[test]
    fn test_listing_pins_folder_note() {
        let vault = MapVault::new(&["P/", "P/P.md", "P/x.md", "P/sub/"]);
        let listing = listing(&vault, &Entry::folder("P"));
        assert_eq!(listing.note, Some(Entry::file("P/P.md")));
        assert_eq!(listing.files, vec![Entry::file("P/x.md")]);
        assert_eq!(listing.len(), 3);
    }

    #[test]
    fn test_listing_hides_unsupported_unless_asked() {
        let mut vault = MapVault::new(&["x.md", "tool.exe"]);
        assert_eq!(listing(&vault, &Entry::root()).files.len(), 1);
        vault.show_unsupported = true;
        assert_eq!(listing(&vault, &Entry::root()).files.len(), 2);
    }

    #[test]
    fn test_supported_file_count_recurses() {
        let vault = MapVault::new(&["d/", "d/a.md", "d/e/", "d/e/b.png", "d/e/c.exe"]);
        assert_eq!(supported_file_count(&vault, &Entry::folder("d")), 2);
    }

    #[test]
    fn test_icons() {
        assert_eq!(icon_for(&Entry::folder("x")), "folder");
        assert_eq!(icon_for(&Entry::file("x.PDF")), "pdf-file");
        assert_eq!(icon_for(&Entry::file("x")), "file");
    }

    #[test]
    fn test_has_editor() {
        assert!(has_editor(&Entry::file("a.md")));
        assert!(!has_editor(&Entry::file("a.png")));
    }
}
