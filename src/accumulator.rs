//! Shared collection of entries discovered during a scan.

use crate::data::Entry;
use parking_lot::Mutex;

/// Unordered, append-only bag of [`Entry`] records.
///
/// Each `append` takes the lock once for the whole batch, so other workers
/// never observe half of a directory's entries. Contents are read back by
/// consuming the accumulator, which is only possible once no worker holds a
/// reference to it anymore.
#[derive(Debug, Default)]
pub struct IndexAccumulator {
    entries: Mutex<Vec<Entry>>,
}

impl IndexAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a batch of entries.
    pub fn append(&self, batch: Vec<Entry>) {
        if batch.is_empty() {
            return;
        }
        self.entries.lock().extend(batch);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Hands over everything collected.
    pub fn into_entries(self) -> Vec<Entry> {
        self.entries.into_inner()
    }
}
