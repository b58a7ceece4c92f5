//! Performance metrics and profiling utilities for `dirindex`.
//!
//! This module provides:
//! - [`PhaseTimer`] - A stopwatch for the phases of a run (traversal, sort, render)
//! - [`rss_after_phase`] - Optional memory usage tracking using `sysinfo`
//! - [`ProfileData`] - Timings plus the traversal counters of a [`ScanReport`]
//! - [`print_profile_summary`] - Terminal output for profiling results
//! - [`save_stats_json`] - JSON output for scripting integration
//!
//! # Usage
//!
//! ```rust
//! use dirindex::metrics::{PhaseTimer, rss_after_phase, ProfileData};
//!
//! let mut profile = ProfileData::new();
//! let timer = PhaseTimer::start("Traversal");
//!
//! // ... do work ...
//!
//! profile.add_phase(timer.stop());
//! profile.memory_peak = rss_after_phase();
//! ```

use crate::engine::ScanReport;
use anyhow::{Context, Result};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use sysinfo::System;

/// A running stopwatch for one named phase of a run.
#[derive(Debug)]
pub struct PhaseTimer {
    name: &'static str,
    started: Instant,
}

impl PhaseTimer {
    pub fn start(name: &'static str) -> Self {
        Self {
            name,
            started: Instant::now(),
        }
    }

    /// Stops the stopwatch and records how long the phase ran.
    pub fn stop(self) -> PhaseResult {
        PhaseResult {
            name: self.name,
            duration: self.started.elapsed(),
        }
    }
}

/// A finished phase; serialized as `{"name": ..., "duration_ms": ...}`.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseResult {
    pub name: &'static str,
    #[serde(rename = "duration_ms", serialize_with = "whole_millis")]
    pub duration: Duration,
}

fn whole_millis<S>(duration: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
}

/// Counters copied out of a finished scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TraversalCounters {
    pub rounds: usize,
    pub directories_listed: usize,
    pub entries: usize,
    pub unreadable_directories: usize,
    pub skipped_entries: usize,
}

impl From<&ScanReport> for TraversalCounters {
    fn from(report: &ScanReport) -> Self {
        Self {
            rounds: report.rounds,
            directories_listed: report.directories_listed,
            entries: report.entries.len(),
            unreadable_directories: report.unreadable_directories,
            skipped_entries: report.skipped_entries,
        }
    }
}

/// Profiling data for a complete run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileData {
    pub phases: Vec<PhaseResult>,
    /// Resident set size after the last measured phase, in bytes
    pub memory_peak: Option<u64>,
    pub traversal: TraversalCounters,
    pub metadata: BTreeMap<String, String>,
}

impl ProfileData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_phase(&mut self, phase: PhaseResult) {
        self.phases.push(phase);
    }

    pub fn record_scan(&mut self, report: &ScanReport) {
        self.traversal = TraversalCounters::from(report);
    }

    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }

    /// Sum of all phase durations.
    pub fn total_duration(&self) -> Duration {
        self.phases.iter().map(|p| p.duration).sum()
    }

    /// Directories listed per second of the "Traversal" phase, if it was timed.
    pub fn directories_per_second(&self) -> Option<f64> {
        let traversal = self.phases.iter().find(|p| p.name == "Traversal")?;
        let secs = traversal.duration.as_secs_f64();
        if secs == 0.0 {
            return None;
        }
        Some(self.traversal.directories_listed as f64 / secs)
    }
}

/// Measures the current process's RSS (Resident Set Size) in bytes.
///
/// Returns `None` on platforms where `sysinfo` cannot see the process.
#[cfg(any(
    target_os = "linux",
    target_os = "macos",
    target_os = "freebsd",
    target_os = "windows"
))]
pub fn rss_after_phase() -> Option<u64> {
    let mut system = System::new();
    system.refresh_processes();

    let current_pid = std::process::id();
    system
        .processes()
        .iter()
        .find(|(pid, _)| pid.as_u32() == current_pid)
        .map(|(_, process)| process.memory())
}

#[cfg(not(any(
    target_os = "linux",
    target_os = "macos",
    target_os = "freebsd",
    target_os = "windows"
)))]
pub fn rss_after_phase() -> Option<u64> {
    None
}

/// Prints a formatted profile summary to stderr.
///
/// # Example Output
/// ```text
/// Run phase timings
///   Traversal           150 ms
///   Render               12 ms
/// Rounds:           7
/// Directories:      1520 (10133.3/s)
/// Entries:          1519
/// Memory peak:      42.0 MB
/// ```
pub fn print_profile_summary(profile: &ProfileData) {
    eprintln!("\nRun phase timings");
    for phase in &profile.phases {
        eprintln!("  {:<15} {:>7} ms", phase.name, phase.duration.as_millis());
    }

    let t = &profile.traversal;
    eprintln!("Rounds:           {}", t.rounds);
    match profile.directories_per_second() {
        Some(rate) => eprintln!("Directories:      {} ({:.1}/s)", t.directories_listed, rate),
        None => eprintln!("Directories:      {}", t.directories_listed),
    }
    eprintln!("Entries:          {}", t.entries);
    if t.unreadable_directories > 0 || t.skipped_entries > 0 {
        eprintln!(
            "Failures:         {} unreadable dir(s), {} skipped entr(y/ies)",
            t.unreadable_directories, t.skipped_entries
        );
    }

    if let Some(memory_peak) = profile.memory_peak {
        let memory_mb = memory_peak as f64 / (1024.0 * 1024.0);
        eprintln!("Memory peak:      {:.1} MB", memory_mb);
    }

    for (key, value) in &profile.metadata {
        eprintln!("  {:<15} {}", key, value);
    }
    eprintln!();
}

/// Writes `stats.json` next to `output_path` and returns its location.
pub fn save_stats_json(output_path: &Path, profile: &ProfileData) -> Result<PathBuf> {
    let stats_path = output_path.with_file_name("stats.json");

    let stats = serde_json::json!({
        "phases": profile.phases,
        "total_duration_ms": profile.total_duration().as_millis() as u64,
        "memory_peak_bytes": profile.memory_peak,
        "traversal": profile.traversal,
        "directories_per_second": profile.directories_per_second(),
        "metadata": profile.metadata,
        "timestamp": chrono::Utc::now().to_rfc3339()
    });

    std::fs::write(&stats_path, serde_json::to_string_pretty(&stats)?)
        .with_context(|| format!("Failed to write {}", stats_path.display()))?;

    Ok(stats_path)
}

/// Times a block, returning `(result, PhaseResult)`.
///
/// ```rust
/// use dirindex::time_phase;
///
/// let (answer, timing) = time_phase!("Render", { 42 });
/// assert_eq!(answer, 42);
/// assert_eq!(timing.name, "Render");
/// ```
#[macro_export]
macro_rules! time_phase {
    ($name:expr, $code:block) => {{
        let timer = $crate::metrics::PhaseTimer::start($name);
        let result = $code;
        let timing = timer.stop();
        (result, timing)
    }};
}
