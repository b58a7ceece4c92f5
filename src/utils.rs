//! Utility functions for the `dirindex` tool.
//!
//! This module provides:
//! - Root-relative link construction for report rows
//! - Base-name lookup for parent folders
//! - Sorting of entries before rendering

use crate::cli::SortKey;
use crate::data::{Entry, EntryKind};
use std::path::{Component, Path};

/// Builds the browser link for `path` relative to `root`.
///
/// Components are joined with `/` regardless of platform, the link always
/// starts with `/`, and directories get a trailing `/`. Returns `None` when
/// `path` is not inside `root`, so an absolute OS path never leaks into the
/// index.
pub fn relative_link(root: &Path, path: &Path, kind: EntryKind) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;

    let mut link = String::new();
    for component in rel.components() {
        match component {
            Component::Normal(part) => {
                link.push('/');
                link.push_str(&part.to_string_lossy());
            }
            Component::CurDir => {}
            _ => return None,
        }
    }

    if kind == EntryKind::Dir || link.is_empty() {
        link.push('/');
    }
    Some(link)
}

/// Base name of a path, or the whole path for roots such as `/` or `C:\`.
pub fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Sorts entries based on the provided sort key.
///
/// # Behavior
/// * `SortKey::Name` - By base name, ties broken by link
/// * `SortKey::Link` - By link, which groups entries by subtree
/// * `SortKey::Modified` - Most recently modified first
pub fn sort_entries(entries: &mut [Entry], sort_key: SortKey) {
    match sort_key {
        SortKey::Name => {
            entries.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.link.cmp(&b.link)))
        }
        SortKey::Link => entries.sort_by(|a, b| a.link.cmp(&b.link)),
        SortKey::Modified => entries.sort_by(|a, b| b.modified_at.cmp(&a.modified_at)),
    }
}
