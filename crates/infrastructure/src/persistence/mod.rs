//! Suite document persistence.

mod suite_file;

pub use suite_file::{SuiteFileError, load_suite};
