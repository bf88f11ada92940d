//! Suite file loading.
//!
//! Suites are declared in JSON or YAML documents; the format is picked
//! from the file extension.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;
use vigil_domain::Suite;

/// Errors raised while loading a suite document.
#[derive(Debug, Error)]
pub enum SuiteFileError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file did not parse as a JSON suite document.
    #[error("{} is not a valid JSON suite: {source}", path.display())]
    Json {
        /// Path that failed to parse.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The file did not parse as a YAML suite document.
    #[error("{} is not a valid YAML suite: {source}", path.display())]
    Yaml {
        /// Path that failed to parse.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_yaml::Error,
    },

    /// The file extension maps to no supported format.
    #[error("unsupported suite file extension for {} (expected .json, .yaml or .yml)", path.display())]
    UnsupportedFormat {
        /// The offending path.
        path: PathBuf,
    },
}

/// Loads a suite document from disk, picking the format by extension.
///
/// # Errors
///
/// Returns an error if the file cannot be read, has an unsupported
/// extension, or does not parse as a suite document.
pub fn load_suite(path: &Path) -> Result<Suite, SuiteFileError> {
    let text = fs::read_to_string(path).map_err(|source| SuiteFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let suite = match extension.as_deref() {
        Some("json") => serde_json::from_str(&text).map_err(|source| SuiteFileError::Json {
            path: path.to_path_buf(),
            source,
        })?,
        Some("yaml" | "yml") => serde_yaml::from_str(&text).map_err(|source| SuiteFileError::Yaml {
            path: path.to_path_buf(),
            source,
        })?,
        _ => {
            return Err(SuiteFileError::UnsupportedFormat {
                path: path.to_path_buf(),
            });
        }
    };

    debug!(path = %path.display(), "loaded suite document");
    Ok(suite)
}
