//! Per-path type and timestamp lookup.
//!
//! The traversal never touches platform metadata directly; it asks a
//! [`MetadataProvider`]. [`FsMetadataProvider`] is the host implementation:
//! it does not follow symlinks, uses the file system's birth time where the
//! platform reports one, and falls back to the inode status-change time on
//! Unix. Where neither exists the lookup fails with
//! [`IndexError::MetadataUnavailable`] and the caller skips that entry.

use crate::error::{IndexError, Result};
use chrono::{DateTime, Utc};
use std::fs::Metadata;
use std::path::Path;

/// What the index needs to know about a single path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryMetadata {
    pub is_dir: bool,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// Source of [`EntryMetadata`], shared by all workers of a scan.
pub trait MetadataProvider: Send + Sync {
    /// Looks up type and timestamps for `path`.
    ///
    /// # Errors
    /// Returns [`IndexError::MetadataUnavailable`] when the path cannot be
    /// inspected or the platform does not expose a creation time.
    fn metadata_of(&self, path: &Path) -> Result<EntryMetadata>;
}

impl<T: MetadataProvider + ?Sized> MetadataProvider for &T {
    fn metadata_of(&self, path: &Path) -> Result<EntryMetadata> {
        (**self).metadata_of(path)
    }
}

/// Reads metadata from the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsMetadataProvider;

impl FsMetadataProvider {
    pub fn new() -> Self {
        Self
    }
}

impl MetadataProvider for FsMetadataProvider {
    fn metadata_of(&self, path: &Path) -> Result<EntryMetadata> {
        let meta = std::fs::symlink_metadata(path)
            .map_err(|e| IndexError::metadata_unavailable(path, e))?;

        let modified_at = meta
            .modified()
            .map(DateTime::<Utc>::from)
            .map_err(|e| IndexError::metadata_unavailable(path, e))?;

        Ok(EntryMetadata {
            is_dir: meta.is_dir(),
            created_at: creation_time(path, &meta)?,
            modified_at,
        })
    }
}

/// Birth time if the platform has one, otherwise the closest equivalent.
fn creation_time(path: &Path, meta: &Metadata) -> Result<DateTime<Utc>> {
    match meta.created() {
        Ok(created) => Ok(DateTime::<Utc>::from(created)),
        Err(err) => fallback_creation_time(meta)
            .ok_or_else(|| IndexError::metadata_unavailable(path, err)),
    }
}

#[cfg(unix)]
fn fallback_creation_time(meta: &Metadata) -> Option<DateTime<Utc>> {
    use std::os::unix::fs::MetadataExt;

    DateTime::<Utc>::from_timestamp(meta.ctime(), meta.ctime_nsec() as u32)
}

#[cfg(not(unix))]
fn fallback_creation_time(_meta: &Metadata) -> Option<DateTime<Utc>> {
    None
}
