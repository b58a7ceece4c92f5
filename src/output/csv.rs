//! CSV output formatter for the index.

use crate::data::Entry;
use anyhow::Result;
use csv::Writer;
use std::io::Write;

/// A single CSV record.
#[derive(Debug, serde::Serialize)]
struct CsvEntry<'a> {
    kind: &'static str,
    name: &'a str,
    link: &'a str,
    folder: &'a str,
    created: String,
    modified: String,
}

/// Renders entries as CSV with a header row.
///
/// Timestamps are written in RFC 3339.
pub fn render<W: Write>(entries: &[Entry], out: W) -> Result<()> {
    let mut writer = Writer::from_writer(out);

    for entry in entries {
        writer.serialize(CsvEntry {
            kind: entry.kind.as_str(),
            name: &entry.name,
            link: &entry.link,
            folder: &entry.parent_folder,
            created: entry.created_at.to_rfc3339(),
            modified: entry.modified_at.to_rfc3339(),
        })?;
    }

    writer.flush()?;
    Ok(())
}
