use crate::app::ports::CivicTransport;
use crate::error::{CivicError, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// reqwest-backed transport with a bounded per-request timeout.
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("civic-info/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url_for(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }
}

#[async_trait]
impl CivicTransport for ReqwestTransport {
    async fn get(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Vec<u8>> {
        let url = self.url_for(endpoint);
        debug!(%url, "GET");

        let resp = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| CivicError::Transport {
                message: e.without_url().to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CivicError::Status {
                status: status.as_u16(),
            });
        }

        let bytes = resp.bytes().await.map_err(|e| CivicError::Transport {
            message: e.without_url().to_string(),
        })?;
        Ok(bytes.to_vec())
    }
}
