//! Vigil Domain - Core harness types
//!
//! This crate defines the domain model for the Vigil contract harness.
//! All types here are pure Rust with no I/O dependencies.

pub mod config;
pub mod contract;
pub mod error;
pub mod request;
pub mod response;
pub mod scenario;

pub use config::{ConfigError, DEFAULT_TIMEOUT_MS, SuiteConfig};
pub use contract::{Check, CheckOutcome, FieldType, ItemCheck, verify};
pub use error::{DomainError, DomainResult};
pub use request::{Header, Headers, HttpMethod, RequestPlan};
pub use response::{ResponseCapture, StatusCode};
pub use scenario::{
    EnvironmentProfile, ErrorCause, RunReport, Scenario, ScenarioResult, ScenarioState,
    ScenarioStatus, Suite,
};
