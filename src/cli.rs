//! CLI interface definitions for the `dirindex` application.
//!
//! This module defines command-line arguments using [`clap`] and exposes:
//!
//! - [`Args`]: the main struct parsed from CLI inputs
//! - [`SortKey`]: how entries are ordered in the report
//! - [`OutputFormat`]: which renderer produces the output
//! - [`StrategyArg`]: sequential or round-parallel traversal
//!
//! # Example
//!
//! ```bash
//! dirindex ~/share --mode files --workers 32 --output share.html
//! ```

use crate::data::IndexMode;
use crate::engine::{EngineConfig, Strategy};
use crate::thread_pool::{resolve_workers, WorkerStrategy, DEFAULT_WORKERS};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

/// Command-line arguments for the `dirindex` indexer.
#[derive(Parser, Debug, Clone)]
#[command(name = "dirindex", version, about)]
pub struct Args {
    /// Directory to index (defaults to the current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Index folders only, or files (folders are still walked)
    #[arg(long, value_enum, default_value_t = IndexMode::FoldersOnly)]
    pub mode: IndexMode,

    /// Traversal strategy
    #[arg(long, value_enum, default_value_t = StrategyArg::Parallel)]
    pub strategy: StrategyArg,

    /// Number of workers launched per round
    #[arg(long, value_name = "N", default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,

    /// Derive the worker count from the host instead of --workers (hidden experimental flag)
    #[arg(long = "workers-strategy", value_enum, default_value_t = WorkerStrategy::Fixed, hide = true)]
    pub workers_strategy: WorkerStrategy,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
    pub format: OutputFormat,

    /// Write output to FILE (html defaults to search.html in the scanned directory, other formats to stdout)
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Sort entries before rendering
    #[arg(long, value_enum, default_value_t = SortKey::Name)]
    pub sort: SortKey,

    /// Show a progress spinner while scanning
    #[arg(long, default_value_t = false)]
    pub progress: bool,

    /// Log every directory as it is indexed
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Enable performance profiling and show timing summary
    #[arg(long, default_value_t = false)]
    pub profile: bool,
}

impl Args {
    /// Builds the engine configuration from the parsed flags.
    ///
    /// # Errors
    /// Fails if the resolved worker count is zero.
    pub fn engine_config(&self) -> crate::error::Result<EngineConfig> {
        let strategy = match self.strategy {
            StrategyArg::Sequential => Strategy::Sequential,
            StrategyArg::Parallel => Strategy::RoundParallel {
                workers: resolve_workers(self.workers_strategy, self.workers)?,
            },
        };
        Ok(EngineConfig::new(self.mode, strategy))
    }

    /// Where the rendered output goes; `None` means stdout.
    ///
    /// The HTML report defaults to `root/search.html`: its row links are
    /// relative to the page, so it has to sit in the scanned root.
    pub fn output_path(&self, root: &Path) -> Option<PathBuf> {
        match (&self.output, self.format) {
            (Some(path), _) => Some(path.clone()),
            (None, OutputFormat::Html) => Some(root.join(DEFAULT_REPORT)),
            (None, _) => None,
        }
    }
}

/// File name of the report when no `--output` is given.
pub const DEFAULT_REPORT: &str = "search.html";

/// Traversal strategy as chosen on the command line.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
pub enum StrategyArg {
    Parallel,
    Sequential,
}

/// Enum for specifying how to sort scan results.
///
/// # Variants
/// * `Name` - Alphabetically by base name
/// * `Link` - Alphabetically by root-relative link
/// * `Modified` - Most recently modified first
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
pub enum SortKey {
    Name,
    Link,
    Modified,
}

/// Output renderers.
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub enum OutputFormat {
    /// Searchable HTML page with the index embedded
    Html,
    /// JSON array of entries
    Json,
    /// One CSV record per entry
    Csv,
    /// Plain lines for the terminal
    Terminal,
}
