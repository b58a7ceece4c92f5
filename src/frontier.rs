//! Pending-directory queue shared by traversal workers.

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::path::PathBuf;

/// Thread-safe FIFO of directories that have been discovered but not listed.
///
/// Pushes append to the tail and pops take from the head, both under one
/// lock, so an item is handed out at most once. `pop_one` never blocks on an
/// empty queue; callers decide at a higher level whether to retry.
#[derive(Debug, Default)]
pub struct Frontier {
    pending: Mutex<VecDeque<PathBuf>>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a frontier holding only the scan root.
    pub fn seeded(root: PathBuf) -> Self {
        Self {
            pending: Mutex::new(VecDeque::from([root])),
        }
    }

    /// Appends a batch of paths to the tail.
    pub fn push<I>(&self, paths: I)
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut pending = self.pending.lock();
        pending.extend(paths);
    }

    /// Removes and returns the head, or `None` if nothing is pending.
    pub fn pop_one(&self) -> Option<PathBuf> {
        self.pending.lock().pop_front()
    }

    /// Current number of pending paths. May be stale while workers run.
    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_fifo_order() {
        let frontier = Frontier::seeded(PathBuf::from("/root"));
        frontier.push(vec![PathBuf::from("/root/a"), PathBuf::from("/root/b")]);

        assert_eq!(frontier.len(), 3);
        assert_eq!(frontier.pop_one(), Some(PathBuf::from("/root")));
        assert_eq!(frontier.pop_one(), Some(PathBuf::from("/root/a")));
        assert_eq!(frontier.pop_one(), Some(PathBuf::from("/root/b")));
        assert_eq!(frontier.pop_one(), None);
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_empty_push_is_noop() {
        let frontier = Frontier::new();
        frontier.push(Vec::new());
        assert!(frontier.is_empty());
        assert_eq!(frontier.pop_one(), None);
    }

    #[test]
    fn test_concurrent_pop_never_duplicates() {
        let frontier = Arc::new(Frontier::new());
        frontier.push((0..1000).map(|i| PathBuf::from(format!("/d/{i}"))));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let frontier = Arc::clone(&frontier);
                thread::spawn(move || {
                    let mut got = Vec::new();
                    while let Some(p) = frontier.pop_one() {
                        got.push(p);
                    }
                    got
                })
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for path in handle.join().unwrap() {
                assert!(seen.insert(path), "path handed out twice");
            }
        }
        assert_eq!(seen.len(), 1000);
    }

    #[test]
    fn test_concurrent_push_keeps_every_path() {
        let frontier = Arc::new(Frontier::new());
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let frontier = Arc::clone(&frontier);
                thread::spawn(move || {
                    for i in 0..250 {
                        frontier.push([PathBuf::from(format!("/w{t}/{i}"))]);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(frontier.len(), 1000);
    }
}
