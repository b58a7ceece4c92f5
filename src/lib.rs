//! Library crate for dirindex
//!
//! Builds a metadata index of a directory tree: one [`Entry`] per directory
//! (or per file) with its name, a root-relative link, its parent folder and
//! its creation/modification times.
//!
//! # Features
//!
//! - **Round-based parallel traversal**: a bounded pool of workers expands a
//!   shared frontier one generation at a time ([`engine`])
//! - **Best-effort scans**: unreadable directories and entries without
//!   metadata are logged and skipped, never fatal
//! - **Report output**: HTML search page, JSON, CSV and terminal renderers
//!
//! # Modules
//!
//! - [`data`]: Core data structures (`Entry`, `EntryKind`, `IndexMode`)
//! - [`frontier`] / [`accumulator`]: Shared state of a scan
//! - [`lister`]: Listing of a single directory
//! - [`metadata`]: Type and timestamp lookup
//! - [`engine`]: The traversal itself
//! - [`cli`], [`output`], [`metrics`]: The command-line front end

pub mod accumulator;
pub mod cli;
pub mod data;
pub mod engine;
pub mod error;
pub mod frontier;
pub mod lister;
pub mod metadata;
pub mod metrics;
pub mod output;
pub mod thread_pool;
pub mod utils;

pub use cli::Args;
pub use data::{Entry, EntryKind, IndexMode};
pub use engine::{index_tree, EngineConfig, ScanReport, Strategy, TraversalEngine};
pub use error::IndexError;
