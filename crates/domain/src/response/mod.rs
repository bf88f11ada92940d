//! HTTP response domain types

mod capture;

pub use capture::{ResponseCapture, StatusCode};
