pub mod config;
pub mod constants;
pub mod dataset;
pub mod domain;
pub mod eligibility;
pub mod envelope;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod metrics;
pub mod voting_info;

// Ports and their infrastructure adapters
pub mod app;
pub mod infra;

pub use envelope::ResultEnvelope;
pub use error::{CivicError, Result};
