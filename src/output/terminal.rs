//! Terminal output formatter for the index.

use crate::data::{Entry, EntryKind};
use anyhow::Result;
use std::io::Write;

/// Renders one line per entry: kind marker, modification time, link.
pub fn render<W: Write>(entries: &[Entry], mut out: W) -> Result<()> {
    for entry in entries {
        let marker = match entry.kind {
            EntryKind::Dir => "[DIR] ",
            EntryKind::File => "[FILE]",
        };
        writeln!(
            out,
            "{} {:<19} {}",
            marker,
            entry.modified_at.format("%Y-%m-%d %H:%M:%S"),
            entry.link
        )?;
    }
    out.flush()?;
    Ok(())
}
