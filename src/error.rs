//! Error types for `dirindex`.
//!
//! Two kinds of error live here:
//! - per-path conditions raised while a scan is in flight
//!   ([`IndexError::DirectoryUnreadable`], [`IndexError::MetadataUnavailable`]).
//!   These are absorbed where they happen, logged, and counted in the
//!   [`ScanReport`](crate::engine::ScanReport); they never abort a scan.
//! - setup errors returned while building a [`TraversalEngine`](crate::engine::TraversalEngine).

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndexError {
    /// A directory could not be listed (permission, removed mid-scan, I/O)
    #[error("Cannot read directory '{}': {source}", path.display())]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Type or timestamps of a single entry could not be determined
    #[error("Metadata unavailable for '{}': {reason}", path.display())]
    MetadataUnavailable { path: PathBuf, reason: String },

    /// A parallel scan was configured with zero workers
    #[error("Worker count must be greater than zero")]
    InvalidWorkerCount,

    /// The worker pool could not be started
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl IndexError {
    /// Builds a [`IndexError::MetadataUnavailable`] from any displayable cause.
    pub fn metadata_unavailable(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        IndexError::MetadataUnavailable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, IndexError>;
