//! Directory-backed vault
//!
//! Treats a directory on disk as the vault: vault paths are `/`-separated
//! paths relative to it. Dotfiles and paths matching the ignore patterns are
//! invisible. The mutating operations return the `VaultEvent` the change
//! produced so the caller can feed it to open menus.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::host::{Entry, Vault, VaultEvent};
use crate::log_debug;
use crate::logic::ignore::{is_ignored, validate_patterns};
use crate::logic::path;

#[derive(Debug, Clone)]
pub struct FsVault {
    root: PathBuf,
    name: String,
    ignore: Vec<String>,
    show_unsupported: bool,
}

impl FsVault {
    /// Open a directory as a vault
    ///
    /// # Errors
    /// If `root` is not a directory
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root: PathBuf = root.into();
        if !root.is_dir() {
            anyhow::bail!("Vault directory not found: {}", root.display());
        }
        let root = root.canonicalize().unwrap_or(root);
        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Vault".to_string());
        Ok(Self {
            root,
            name,
            ignore: Vec::new(),
            show_unsupported: false,
        })
    }

    /// Hide paths matching these globs; invalid patterns are skipped and logged
    pub fn with_ignore(mut self, patterns: &[String]) -> Self {
        let (valid, invalid) = validate_patterns(patterns);
        for pattern in invalid {
            log_debug(&format!("Ignoring invalid ignore pattern: {}", pattern));
        }
        self.ignore = valid;
        self
    }

    pub fn with_show_unsupported(mut self, show: bool) -> Self {
        self.show_unsupported = show;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Filesystem location of a vault path
    pub fn resolve(&self, vault_path: &str) -> PathBuf {
        if vault_path == path::ROOT {
            return self.root.clone();
        }
        vault_path
            .split('/')
            .filter(|s| !s.is_empty())
            .fold(self.root.clone(), |acc, segment| acc.join(segment))
    }

    fn is_hidden(&self, vault_path: &str) -> bool {
        vault_path.split('/').any(|s| s.starts_with('.')) || is_ignored(&self.ignore, vault_path)
    }

    fn entry_at(&self, vault_path: &str) -> Option<Entry> {
        if vault_path == path::ROOT {
            return Some(Entry::root());
        }
        if self.is_hidden(vault_path) {
            return None;
        }
        let meta = fs::metadata(self.resolve(vault_path)).ok()?;
        Some(if meta.is_dir() {
            Entry::folder(vault_path)
        } else {
            Entry::file(vault_path)
        })
    }

    fn require_folder(&self, folder: &str) -> Result<PathBuf> {
        let dir = self.resolve(folder);
        if !dir.is_dir() {
            anyhow::bail!("Not a folder: {}", folder);
        }
        Ok(dir)
    }

    /// First free name in `folder`: `Untitled`, `Untitled 1`, `Untitled 2`...
    fn available_name(&self, folder: &str, stem: &str, extension: &str) -> String {
        let candidate = |n: usize| {
            let stem = if n == 0 { stem.to_string() } else { format!("{} {}", stem, n) };
            if extension.is_empty() {
                stem
            } else {
                format!("{}.{}", stem, extension)
            }
        };
        (0..)
            .map(candidate)
            .find(|name| !self.resolve(&path::join(folder, name)).exists())
            .unwrap_or_else(|| format!("{}.{}", stem, extension))
    }

    /// Create an empty note in `folder`
    pub fn create_note(&self, folder: &str) -> Result<(String, VaultEvent)> {
        self.require_folder(folder)?;
        let created = path::join(folder, &self.available_name(folder, "Untitled", "md"));
        fs::write(self.resolve(&created), "")
            .with_context(|| format!("Failed to create {}", created))?;
        log_debug(&format!("Created note {}", created));
        Ok((created.clone(), VaultEvent::Create(created)))
    }

    pub fn create_folder(&self, folder: &str) -> Result<(String, VaultEvent)> {
        self.require_folder(folder)?;
        let created = path::join(folder, &self.available_name(folder, "Untitled", ""));
        fs::create_dir(self.resolve(&created))
            .with_context(|| format!("Failed to create folder {}", created))?;
        log_debug(&format!("Created folder {}", created));
        Ok((created.clone(), VaultEvent::Create(created)))
    }

    /// Give an entry a new name in the same folder
    pub fn rename(&self, vault_path: &str, new_name: &str) -> Result<VaultEvent> {
        let new_name = new_name.trim();
        if new_name.is_empty() || new_name.contains('/') {
            anyhow::bail!("Invalid name: {:?}", new_name);
        }
        let parent = path::parent_of(vault_path)
            .with_context(|| format!("Cannot rename {}", vault_path))?;
        self.relocate(vault_path, &path::join(&parent, new_name))
    }

    /// Move an entry into another folder, keeping its name
    pub fn move_to(&self, vault_path: &str, folder: &str) -> Result<VaultEvent> {
        self.require_folder(folder)?;
        if path::is_within(folder, vault_path) {
            anyhow::bail!("Cannot move {} into itself", vault_path);
        }
        self.relocate(vault_path, &path::join(folder, path::name_of(vault_path)))
    }

    fn relocate(&self, from: &str, to: &str) -> Result<VaultEvent> {
        if from == path::ROOT {
            anyhow::bail!("Cannot move the vault root");
        }
        let destination = self.resolve(to);
        if destination.exists() {
            anyhow::bail!("{} already exists", to);
        }
        fs::rename(self.resolve(from), &destination)
            .with_context(|| format!("Failed to move {} to {}", from, to))?;
        log_debug(&format!("Renamed {} to {}", from, to));
        Ok(VaultEvent::Rename {
            path: to.to_string(),
            old_path: from.to_string(),
        })
    }

    pub fn delete(&self, vault_path: &str) -> Result<VaultEvent> {
        if vault_path == path::ROOT {
            anyhow::bail!("Cannot delete the vault root");
        }
        let target = self.resolve(vault_path);
        let removed = if target.is_dir() {
            fs::remove_dir_all(&target)
        } else {
            fs::remove_file(&target)
        };
        removed.with_context(|| format!("Failed to delete {}", vault_path))?;
        log_debug(&format!("Deleted {}", vault_path));
        Ok(VaultEvent::Delete(vault_path.to_string()))
    }

    pub fn read_to_string(&self, vault_path: &str) -> Result<String> {
        fs::read_to_string(self.resolve(vault_path))
            .with_context(|| format!("Failed to read {}", vault_path))
    }
}

impl Vault for FsVault {
    fn entry(&self, vault_path: &str) -> Option<Entry> {
        self.entry_at(vault_path)
    }

    fn children(&self, folder: &str) -> Vec<Entry> {
        let Ok(read_dir) = fs::read_dir(self.resolve(folder)) else {
            return Vec::new();
        };
        read_dir
            .filter_map(|dirent| dirent.ok())
            .filter_map(|dirent| {
                let name = dirent.file_name().to_string_lossy().into_owned();
                let child = path::join(folder, &name);
                if self.is_hidden(&child) {
                    return None;
                }
                let is_dir = dirent.file_type().ok()?.is_dir()
                    || dirent.path().is_dir();
                Some(if is_dir {
                    Entry::folder(child)
                } else {
                    Entry::file(child)
                })
            })
            .collect()
    }

    fn show_unsupported_files(&self) -> bool {
        self.show_unsupported
    }

    fn vault_name(&self) -> String {
        self.name.clone()
    }
}
