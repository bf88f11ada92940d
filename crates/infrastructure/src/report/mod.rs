//! Run report rendering.
//!
//! Two surfaces: a machine-readable JSON document and a human-readable
//! summary. The summary goes to stdout; the JSON document is the
//! contract other tooling consumes.

mod json;
mod summary;

pub use json::{ReportError, render_json, write_json};
pub use summary::render_summary;
