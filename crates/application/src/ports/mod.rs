//! Port definitions (interfaces)
//!
//! Ports define the boundary between the harness core and external
//! systems. Each port is a trait implemented by an adapter in the
//! infrastructure layer.

mod cancellation;
mod http_client;

pub use cancellation::CancellationToken;
pub use http_client::{ExecutorError, HttpClient};
