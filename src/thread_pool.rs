//! Worker-pool sizing and construction.
//!
//! The round-based traversal launches a fixed number of workers per round.
//! That width is a plain knob by default; these strategies derive it from the
//! host instead when asked to.
//!
//! # Strategies
//! - `Fixed`: Uses exactly the requested number of workers (default 20)
//! - `NumCpus`: One worker per logical CPU
//! - `NumCpusMinus1`: Number of CPUs minus 1 (leaves one CPU free)
//! - `IOHeavy`: 2x CPU count, for high-latency file systems

use crate::error::{IndexError, Result};
use clap::ValueEnum;
use rayon::{ThreadPool, ThreadPoolBuilder};

/// Worker count used when nothing else is configured.
pub const DEFAULT_WORKERS: usize = 20;

/// Worker-pool sizing strategies.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum WorkerStrategy {
    /// Use exactly the requested number of workers
    #[default]
    Fixed,
    /// One worker per logical CPU
    NumCpus,
    /// Use number of CPUs minus 1 (leaves one CPU free)
    NumCpusMinus1,
    /// Optimized for I/O-heavy workloads (2x CPU count)
    IOHeavy,
}

impl WorkerStrategy {
    /// Returns a string representation of the strategy for display purposes.
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkerStrategy::Fixed => "Fixed",
            WorkerStrategy::NumCpus => "NumCpus",
            WorkerStrategy::NumCpusMinus1 => "NumCpusMinus1",
            WorkerStrategy::IOHeavy => "IOHeavy",
        }
    }
}

/// Resolves the number of workers per round.
///
/// # Arguments
/// * `strategy` - How to size the pool
/// * `requested` - Worker count for the `Fixed` strategy, ignored otherwise
///
/// # Errors
/// Returns [`IndexError::InvalidWorkerCount`] for `Fixed` with zero workers.
pub fn resolve_workers(strategy: WorkerStrategy, requested: usize) -> Result<usize> {
    let cpus = num_cpus::get();
    let workers = match strategy {
        WorkerStrategy::Fixed => {
            if requested == 0 {
                return Err(IndexError::InvalidWorkerCount);
            }
            requested
        }
        WorkerStrategy::NumCpus => cpus,
        WorkerStrategy::NumCpusMinus1 => std::cmp::max(1, cpus.saturating_sub(1)),
        WorkerStrategy::IOHeavy => cpus * 2,
    };
    Ok(workers)
}

/// Builds a dedicated pool with exactly `workers` threads.
///
/// The pool is private to one engine so the scan never competes with (or
/// reconfigures) rayon's global pool.
pub fn build_pool(workers: usize) -> Result<ThreadPool> {
    if workers == 0 {
        return Err(IndexError::InvalidWorkerCount);
    }
    let pool = ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("dirindex-worker-{i}"))
        .build()?;
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_strategy_as_str() {
        assert_eq!(WorkerStrategy::Fixed.as_str(), "Fixed");
        assert_eq!(WorkerStrategy::NumCpus.as_str(), "NumCpus");
        assert_eq!(WorkerStrategy::NumCpusMinus1.as_str(), "NumCpusMinus1");
        assert_eq!(WorkerStrategy::IOHeavy.as_str(), "IOHeavy");
    }

    #[test]
    fn test_resolve_fixed() {
        assert_eq!(resolve_workers(WorkerStrategy::Fixed, 20).unwrap(), 20);
        assert!(matches!(
            resolve_workers(WorkerStrategy::Fixed, 0),
            Err(IndexError::InvalidWorkerCount)
        ));
    }

    #[test]
    fn test_resolve_cpu_derived() {
        let cpus = num_cpus::get();
        assert_eq!(resolve_workers(WorkerStrategy::NumCpus, 0).unwrap(), cpus);
        assert_eq!(
            resolve_workers(WorkerStrategy::NumCpusMinus1, 0).unwrap(),
            std::cmp::max(1, cpus - 1)
        );
        assert_eq!(resolve_workers(WorkerStrategy::IOHeavy, 7).unwrap(), cpus * 2);
    }

    #[test]
    fn test_build_pool_width() {
        let pool = build_pool(3).unwrap();
        assert_eq!(pool.current_num_threads(), 3);
        assert!(build_pool(0).is_err());
    }
}
