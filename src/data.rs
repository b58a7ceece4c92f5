//! Data structures for representing indexed file system entries.
//!
//! This module defines the records produced by a scan and the mode that
//! decides which of them are indexed.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;

/// One indexed file or directory.
///
/// Field names are serialized in the shape the search report's table expects.
///
/// # Fields
/// * `name` - Base name of the file or directory
/// * `link` - Root-relative, `/`-separated link; directories end with `/`
/// * `parent_folder` - Base name of the directory the entry was found in
/// * `created_at` - Creation time as reported by the metadata provider
/// * `modified_at` - Last modification time
/// * `kind` - File or directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Link")]
    pub link: String,
    #[serde(rename = "Folder")]
    pub parent_folder: String,
    #[serde(rename = "Creation_date")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "Modified_date")]
    pub modified_at: DateTime<Utc>,
    #[serde(rename = "Kind")]
    pub kind: EntryKind,
}

/// Represents the type of an indexed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntryKind {
    File,
    Dir,
}

impl EntryKind {
    /// Returns `"FILE"` or `"DIR"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::File => "FILE",
            EntryKind::Dir => "DIR",
        }
    }
}

/// Which children of a listed directory become entries.
///
/// Sub-directories are always traversed; the mode only controls what is
/// recorded in the index.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum IndexMode {
    /// Index directories only
    #[default]
    #[value(name = "folders")]
    FoldersOnly,
    /// Index files; directories are walked but not recorded
    #[value(name = "files")]
    FoldersAndFiles,
}

impl IndexMode {
    /// Whether a child of the given kind is recorded in this mode.
    pub fn indexes(&self, kind: EntryKind) -> bool {
        match self {
            IndexMode::FoldersOnly => kind == EntryKind::Dir,
            IndexMode::FoldersAndFiles => kind == EntryKind::File,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IndexMode::FoldersOnly => "folders",
            IndexMode::FoldersAndFiles => "files",
        }
    }
}
