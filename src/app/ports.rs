use crate::error::Result;
use async_trait::async_trait;

/// Outbound side of the gateway: one GET against the civic-information
/// service, returning the raw response body.
///
/// Implementations report network failures, timeouts and non-2xx statuses
/// as transport-class errors (see `CivicError::is_transport`).
#[async_trait]
pub trait CivicTransport: Send + Sync {
    async fn get(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Vec<u8>>;
}
