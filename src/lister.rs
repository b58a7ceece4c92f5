//! Single-directory listing.
//!
//! [`DirectoryLister::list`] reads the immediate children of one directory
//! and splits them into:
//! - entries to index (directories or files, depending on [`IndexMode`])
//! - sub-directories to hand back to the frontier, in every mode
//!
//! Nothing in here is fatal. An unreadable directory produces an empty
//! listing and a warning; a child whose metadata cannot be read is dropped
//! on its own while its siblings are still indexed.

use crate::data::{Entry, EntryKind, IndexMode};
use crate::error::IndexError;
use crate::metadata::{FsMetadataProvider, MetadataProvider};
use crate::utils::{base_name, relative_link};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Result of listing one directory.
#[derive(Debug, Default)]
pub struct Listing {
    /// Children that are terminal for the current mode
    pub entries: Vec<Entry>,
    /// Immediate sub-directories, absolute
    pub sub_paths: Vec<PathBuf>,
    /// Children dropped because their type or metadata could not be read
    pub skipped: usize,
    /// The directory itself could not be read
    pub unreadable: bool,
}

impl Listing {
    fn unreadable() -> Self {
        Self {
            unreadable: true,
            ..Self::default()
        }
    }
}

/// Lists directories below a fixed scan root.
#[derive(Debug, Clone)]
pub struct DirectoryLister<P = FsMetadataProvider> {
    root: PathBuf,
    mode: IndexMode,
    provider: P,
}

impl DirectoryLister<FsMetadataProvider> {
    /// Lister backed by the local file system.
    pub fn for_root(root: impl Into<PathBuf>, mode: IndexMode) -> Self {
        Self::new(root, mode, FsMetadataProvider::new())
    }
}

impl<P: MetadataProvider> DirectoryLister<P> {
    pub fn new(root: impl Into<PathBuf>, mode: IndexMode, provider: P) -> Self {
        Self {
            root: root.into(),
            mode,
            provider,
        }
    }

    /// Lists `dir`, absorbing every error.
    pub fn list(&self, dir: &Path) -> Listing {
        let read = match fs::read_dir(dir) {
            Ok(read) => read,
            Err(source) => {
                let err = IndexError::DirectoryUnreadable {
                    path: dir.to_path_buf(),
                    source,
                };
                warn!("{}", err);
                return Listing::unreadable();
            }
        };

        let parent_folder = base_name(dir);
        let mut listing = Listing::default();

        for child in read {
            let child = match child {
                Ok(child) => child,
                Err(e) => {
                    warn!("Skipping unreadable entry in '{}': {}", dir.display(), e);
                    listing.skipped += 1;
                    continue;
                }
            };
            let path = child.path();

            // The directory entry usually carries its type, which saves a stat
            // for sub-directories that are not indexed in this mode.
            let kind = match child.file_type() {
                Ok(ft) if ft.is_dir() => Some(EntryKind::Dir),
                Ok(_) => Some(EntryKind::File),
                Err(_) => None,
            };

            let (kind, metadata) = match kind {
                Some(kind) if !self.mode.indexes(kind) => (kind, None),
                Some(kind) => match self.provider.metadata_of(&path) {
                    Ok(meta) => (kind, Some(meta)),
                    Err(err) => {
                        warn!("{}", err);
                        listing.skipped += 1;
                        if kind == EntryKind::Dir {
                            listing.sub_paths.push(path);
                        }
                        continue;
                    }
                },
                None => match self.provider.metadata_of(&path) {
                    Ok(meta) => {
                        let kind = if meta.is_dir {
                            EntryKind::Dir
                        } else {
                            EntryKind::File
                        };
                        (kind, Some(meta))
                    }
                    Err(err) => {
                        warn!("{}", err);
                        listing.skipped += 1;
                        continue;
                    }
                },
            };

            if kind == EntryKind::Dir {
                listing.sub_paths.push(path.clone());
            }

            let Some(meta) = metadata.filter(|_| self.mode.indexes(kind)) else {
                continue;
            };

            let Some(link) = relative_link(&self.root, &path, kind) else {
                warn!(
                    "Skipping '{}': not below scan root '{}'",
                    path.display(),
                    self.root.display()
                );
                listing.skipped += 1;
                continue;
            };

            listing.entries.push(Entry {
                name: child.file_name().to_string_lossy().into_owned(),
                link,
                parent_folder: parent_folder.clone(),
                created_at: meta.created_at,
                modified_at: meta.modified_at,
                kind,
            });
        }

        listing
    }
}
