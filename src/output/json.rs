//! JSON encoding of the index.

use crate::data::Entry;
use anyhow::{Context, Result};
use std::io::Write;

/// Encodes entries as a compact JSON array.
pub fn to_json(entries: &[Entry]) -> Result<String> {
    serde_json::to_string(entries).context("Failed to encode index as JSON")
}

/// Writes entries as a JSON array followed by a newline.
pub fn render<W: Write>(entries: &[Entry], mut out: W) -> Result<()> {
    serde_json::to_writer(&mut out, entries).context("Failed to write JSON index")?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::EntryKind;
    use chrono::{DateTime, Utc};

    #[test]
    fn test_to_json_array() {
        let ts = DateTime::<Utc>::from_timestamp(0, 0).unwrap();
        let entries = vec![Entry {
            name: "a".to_string(),
            link: "/a/".to_string(),
            parent_folder: "root".to_string(),
            created_at: ts,
            modified_at: ts,
            kind: EntryKind::Dir,
        }];

        let json = to_json(&entries).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 1);
        assert_eq!(parsed[0]["Link"], "/a/");
        assert_eq!(parsed[0]["Creation_date"], "1970-01-01T00:00:00Z");
    }

    #[test]
    fn test_render_empty() {
        let mut buf = Vec::new();
        render(&[], &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "[]\n");
    }
}
