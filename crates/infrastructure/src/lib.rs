//! Vigil Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports defined in
//! the application layer, plus suite-file loading and report rendering.

pub mod adapters;
pub mod persistence;
pub mod report;

pub use adapters::ReqwestExecutor;
pub use persistence::{SuiteFileError, load_suite};
pub use report::{ReportError, render_json, render_summary, write_json};
