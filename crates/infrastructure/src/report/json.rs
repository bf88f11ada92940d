//! Machine-readable report rendering.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use vigil_domain::RunReport;

/// Errors raised while rendering or persisting a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The report could not be serialized.
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The report file could not be written.
    #[error("failed to write report to {}: {source}", path.display())]
    Io {
        /// Path that failed to write.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Renders the report as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json(report: &RunReport) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Writes the JSON report to a file.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn write_json(report: &RunReport, path: &Path) -> Result<(), ReportError> {
    let rendered = render_json(report)?;
    fs::write(path, rendered).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
