//! Main entry point for the `dirindex` CLI application.
//!
//! `dirindex` walks a directory tree and writes a searchable index of it.
//!
//! # Responsibilities
//! - Parses CLI arguments via [`clap`] using the [`Args`] struct
//! - Sets up `tracing` output
//! - Resolves the root against the current working directory
//! - Runs the [`TraversalEngine`] and renders the resulting entries
//!
//! # Flags of Interest
//! - `--mode files`: Index files instead of folders
//! - `--workers N`: Workers launched per round
//! - `--strategy sequential`: Single-threaded traversal
//! - `--format html|json|csv|terminal`: Output renderer

use anyhow::{Context, Result};
use clap::Parser;
use dirindex::cli::{Args, OutputFormat};
use dirindex::metrics::{print_profile_summary, rss_after_phase, save_stats_json, ProfileData};
use dirindex::output::{render_csv, render_html, render_json, render_terminal};
use dirindex::utils::sort_entries;
use dirindex::{time_phase, Entry, TraversalEngine};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn setup_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("dirindex=debug,warn")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dirindex=info,warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Resolves the scan root against the current working directory.
fn resolve_root(path: &Path) -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    let joined = cwd.join(path);
    joined
        .canonicalize()
        .with_context(|| format!("Cannot resolve scan root '{}'", joined.display()))
}

fn spinner() -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner} Indexing... [{elapsed}] {msg}")
            .context("Failed to set progress template")?,
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

fn write_output(entries: &[Entry], args: &Args, root: &Path) -> Result<()> {
    let out: Box<dyn Write> = match args.output_path(root) {
        Some(path) => Box::new(BufWriter::new(
            File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    match args.format {
        OutputFormat::Html => render_html(entries, out)?,
        OutputFormat::Json => render_json(entries, out)?,
        OutputFormat::Csv => render_csv(entries, out)?,
        OutputFormat::Terminal => render_terminal(entries, out)?,
    }

    if let Some(path) = args.output_path(root) {
        info!("Output saved to: {}", path.display());
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);

    let root = resolve_root(&args.path)?;
    let config = args.engine_config()?;

    let mut engine = TraversalEngine::new(config).context("Failed to start traversal")?;
    let progress = if args.progress { Some(spinner()?) } else { None };
    if let Some(pb) = &progress {
        engine = engine.with_progress(pb.clone());
    }

    let mut profile = ProfileData::new();

    let (report, timing) = time_phase!("Traversal", { engine.run(&root) });
    profile.add_phase(timing);
    profile.record_scan(&report);
    if let Some(pb) = progress {
        pb.finish_with_message(format!("{} entries", report.entries.len()));
    }

    let mut entries = report.entries;
    let ((), timing) = time_phase!("Sort", { sort_entries(&mut entries, args.sort) });
    profile.add_phase(timing);

    let (written, timing) = time_phase!("Render", { write_output(&entries, &args, &root) });
    written?;
    profile.add_phase(timing);

    if args.profile {
        profile.memory_peak = rss_after_phase();
        profile.add_metadata("mode", config.mode.as_str());
        profile.add_metadata("workers", &config.strategy.workers().to_string());
        profile.add_metadata("sizing", args.workers_strategy.as_str());
        print_profile_summary(&profile);
        if let Some(path) = args.output_path(&root) {
            let stats = save_stats_json(&path, &profile)?;
            info!("Performance stats saved to: {}", stats.display());
        }
    }

    Ok(())
}
