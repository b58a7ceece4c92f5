//! Renderers for a finished index.
//!
//! Each formatter takes a slice of already-sorted [`Entry`](crate::data::Entry)
//! records and writes them somewhere. They hold no state and contain no
//! traversal logic, which keeps them easy to test and extend.
//!
//! # Available Formatters
//!
//! - **HTML**: The searchable report page with the index embedded as JSON
//! - **JSON**: The bare record list
//! - **CSV**: One record per entry for spreadsheets and scripts
//! - **Terminal**: Human-readable lines

pub mod csv;
pub mod html;
pub mod json;
pub mod terminal;

pub use self::csv::render as render_csv;
pub use self::html::render as render_html;
pub use self::json::render as render_json;
pub use self::terminal::render as render_terminal;
