//! The searchable HTML report.
//!
//! The page loads Tabulator from a CDN and embeds the index as a JavaScript
//! array literal. Clicking a row opens the entry's link relative to the page,
//! so the report is meant to be written into the scanned root.

use crate::data::Entry;
use crate::output::json::to_json;
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::io::Write;

const HEAD: &str = r##"<html>
<head>
<title>Search</title>
<link href="https://unpkg.com/tabulator-tables@4.9.3/dist/css/tabulator.min.css" rel="stylesheet">
</head>
<body>
<div id="index-table"></div>
"##;

const TABLE: &str = r##"
var table = new Tabulator("#index-table", {
    data: tabledata,
    layout: "fitColumns",
    responsiveLayout: "hide",
    tooltips: true,
    pagination: "local",
    paginationSize: 150,
    paginationSizeSelector: [150, 250, 500, 1000, 1500],
    movableColumns: true,
    initialSort: [{column: "Name", dir: "asc"}],
    columns: [
        {title: "Name", field: "Name", headerFilter: "input"},
        {title: "Folder", field: "Folder", headerFilter: "input"},
        {title: "Creation date", field: "Creation_date", headerFilter: "input"},
        {title: "Modified date", field: "Modified_date", headerFilter: "input"},
    ],
    rowClick: function(e, row) {
        window.open("." + row.getData().Link, "_blank");
    },
});
</script>
</body>
</html>
"##;

/// Makes JSON safe to embed in a `<script>` element.
///
/// A file named `</script>` must not be able to close the element early.
fn escape_for_script(json: &str) -> String {
    json.replace("</", "<\\/")
}

/// Builds the full report page.
pub fn page(entries: &[Entry], generated_at: DateTime<Local>) -> Result<String> {
    let json = escape_for_script(&to_json(entries)?);

    let mut html = String::with_capacity(HEAD.len() + TABLE.len() + json.len() + 256);
    html.push_str(HEAD);
    html.push_str(&format!(
        "<p>Updated on {}</p>\n",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    ));
    html.push_str(r#"<script src="https://unpkg.com/tabulator-tables@4.9.3/dist/js/tabulator.min.js"></script>"#);
    html.push_str("\n<script>\nvar tabledata = ");
    html.push_str(&json);
    html.push(';');
    html.push_str(TABLE);
    Ok(html)
}

/// Writes the report page stamped with the current local time.
pub fn render<W: Write>(entries: &[Entry], mut out: W) -> Result<()> {
    let html = page(entries, Local::now())?;
    out.write_all(html.as_bytes())
        .context("Failed to write HTML report")?;
    out.flush()?;
    Ok(())
}
