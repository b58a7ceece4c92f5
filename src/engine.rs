//! Round-based parallel traversal.
//!
//! The engine expands a [`Frontier`] of pending directories in rounds:
//!
//! ```text
//!   round N                                   round N+1
//!   ┌──────────────────────────────┐          ┌────────────────────
//!   │ generation = frontier head   │          │ generation = what
//!   │ W workers claim + list dirs  │ barrier  │ round N discovered
//!   │ new sub-dirs → frontier tail │ ───────► │ ...
//!   └──────────────────────────────┘          └────────────────────
//! ```
//!
//! Each round fixes its generation (the paths pending when it starts) and
//! launches `W` workers inside a rayon scope on a pool of exactly `W`
//! threads. Workers hand out the generation through an atomic ticket, so a
//! directory discovered in round N is never listed before round N+1. The scope
//! only returns once every worker is done, which is the barrier; when the
//! frontier is empty after it, nothing can still be in flight and the scan is
//! complete. A tree of depth K therefore takes exactly K rounds, whatever the
//! width.
//!
//! A persistent pool draining a live queue would avoid relaunching workers,
//! but needs explicit termination detection (an active-worker counter checked
//! together with queue emptiness under one lock). That is not what this
//! engine does.

use crate::accumulator::IndexAccumulator;
use crate::data::{Entry, IndexMode};
use crate::error::Result;
use crate::frontier::Frontier;
use crate::lister::DirectoryLister;
use crate::metadata::{FsMetadataProvider, MetadataProvider};
use crate::thread_pool::{build_pool, DEFAULT_WORKERS};
use indicatif::ProgressBar;
use rayon::ThreadPool;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info};

/// How directories of one round are processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Every round runs on the calling thread
    Sequential,
    /// Every round runs `workers` concurrent workers
    RoundParallel { workers: usize },
}

impl Strategy {
    pub fn workers(&self) -> usize {
        match self {
            Strategy::Sequential => 1,
            Strategy::RoundParallel { workers } => *workers,
        }
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::RoundParallel {
            workers: DEFAULT_WORKERS,
        }
    }
}

/// Everything the engine needs besides the root path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineConfig {
    pub mode: IndexMode,
    pub strategy: Strategy,
}

impl EngineConfig {
    pub fn new(mode: IndexMode, strategy: Strategy) -> Self {
        Self { mode, strategy }
    }
}

/// Outcome of one complete scan.
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Indexed entries, in no particular order
    pub entries: Vec<Entry>,
    /// Number of rounds until the frontier ran dry
    pub rounds: usize,
    /// Directories popped from the frontier, readable or not
    pub directories_listed: usize,
    /// Directories that could not be read
    pub unreadable_directories: usize,
    /// Children dropped because their metadata was unavailable
    pub skipped_entries: usize,
}

impl ScanReport {
    /// True when every directory was read and every child was indexed.
    pub fn is_complete(&self) -> bool {
        self.unreadable_directories == 0 && self.skipped_entries == 0
    }
}

#[derive(Debug, Default)]
struct ScanStats {
    listed: AtomicUsize,
    unreadable: AtomicUsize,
    skipped: AtomicUsize,
}

/// Shared state of one round, borrowed by all of its workers.
struct Round<'a, P> {
    lister: &'a DirectoryLister<P>,
    frontier: &'a Frontier,
    accumulator: &'a IndexAccumulator,
    stats: &'a ScanStats,
    progress: Option<&'a ProgressBar>,
    generation: usize,
    tickets: AtomicUsize,
}

impl<P: MetadataProvider> Round<'_, P> {
    /// Lists directories of this round's generation until none are left.
    ///
    /// A worker may claim several units of the generation instead of exactly
    /// one, so a tree of depth K takes exactly K rounds whatever the width.
    fn work(&self, id: usize) {
        while self.tickets.fetch_add(1, Ordering::Relaxed) < self.generation {
            // A ticket below the generation size always finds a path: the
            // generation sits at the head and nothing else pops this round.
            let Some(dir) = self.frontier.pop_one() else {
                break;
            };
            debug!("Worker {} indexing {}", id, dir.display());

            let listing = self.lister.list(&dir);
            self.stats.listed.fetch_add(1, Ordering::Relaxed);
            if listing.unreadable {
                self.stats.unreadable.fetch_add(1, Ordering::Relaxed);
            }
            self.stats
                .skipped
                .fetch_add(listing.skipped, Ordering::Relaxed);

            self.accumulator.append(listing.entries);
            self.frontier.push(listing.sub_paths);

            if let Some(pb) = self.progress {
                pb.tick();
            }
        }
    }
}

/// Drives a scan from the root until the frontier is exhausted.
pub struct TraversalEngine<P = FsMetadataProvider> {
    config: EngineConfig,
    provider: P,
    pool: Option<ThreadPool>,
    progress: Option<ProgressBar>,
}

impl TraversalEngine<FsMetadataProvider> {
    /// Engine reading metadata from the local file system.
    ///
    /// # Errors
    /// Fails if a parallel strategy has zero workers or the pool cannot start.
    pub fn new(config: EngineConfig) -> Result<Self> {
        Self::with_provider(config, FsMetadataProvider::new())
    }
}

impl<P: MetadataProvider> TraversalEngine<P> {
    pub fn with_provider(config: EngineConfig, provider: P) -> Result<Self> {
        let pool = match config.strategy {
            Strategy::Sequential => None,
            Strategy::RoundParallel { workers } => Some(build_pool(workers)?),
        };
        Ok(Self {
            config,
            provider,
            pool,
            progress: None,
        })
    }

    /// Reports round progress on the given bar while scanning.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Indexes the tree below `root`.
    ///
    /// Never fails: unreadable directories and entries without metadata are
    /// logged, counted in the report, and left out of the index.
    pub fn run(&self, root: &Path) -> ScanReport {
        let lister = DirectoryLister::new(root, self.config.mode, &self.provider);
        let frontier = Frontier::seeded(root.to_path_buf());
        let accumulator = IndexAccumulator::new();
        let stats = ScanStats::default();

        info!(
            "Indexing {} ({} mode, {} worker(s))",
            root.display(),
            self.config.mode.as_str(),
            self.config.strategy.workers()
        );

        let mut rounds = 0;
        while !frontier.is_empty() {
            rounds += 1;
            let generation = frontier.len();
            debug!(round = rounds, pending = generation, "Starting round");

            if let Some(pb) = &self.progress {
                pb.set_message(format!(
                    "round {}: {} directories pending, {} entries",
                    rounds,
                    generation,
                    accumulator.len()
                ));
            }

            let round = Round {
                lister: &lister,
                frontier: &frontier,
                accumulator: &accumulator,
                stats: &stats,
                progress: self.progress.as_ref(),
                generation,
                tickets: AtomicUsize::new(0),
            };

            match &self.pool {
                Some(pool) => {
                    let workers = pool.current_num_threads();
                    pool.scope(|s| {
                        for id in 0..workers {
                            let round = &round;
                            s.spawn(move |_| round.work(id));
                        }
                    });
                }
                None => round.work(0),
            }
        }

        let report = ScanReport {
            entries: accumulator.into_entries(),
            rounds,
            directories_listed: stats.listed.into_inner(),
            unreadable_directories: stats.unreadable.into_inner(),
            skipped_entries: stats.skipped.into_inner(),
        };

        info!(
            rounds = report.rounds,
            entries = report.entries.len(),
            directories = report.directories_listed,
            unreadable = report.unreadable_directories,
            skipped = report.skipped_entries,
            "Scan complete"
        );

        report
    }
}

/// Indexes `root` with the default parallel configuration.
///
/// # Errors
/// Fails only if the worker pool cannot be built.
pub fn index_tree(root: impl Into<PathBuf>, mode: IndexMode) -> Result<Vec<Entry>> {
    let root = root.into();
    let engine = TraversalEngine::new(EngineConfig::new(mode, Strategy::default()))?;
    Ok(engine.run(&root).entries)
}
