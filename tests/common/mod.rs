#![allow(dead_code)]

use async_trait::async_trait;
use civic_info::app::ports::CivicTransport;
use civic_info::gateway::CivicClient;
use civic_info::{CivicError, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const TEST_KEY: &str = "test-key";

#[derive(Clone)]
pub enum Reply {
    Json(Value),
    Body(&'static str),
    Unreachable,
    Status(u16),
}

/// Transport that answers from canned replies and records every request.
#[derive(Default)]
pub struct FakeTransport {
    replies: HashMap<String, Reply>,
    calls: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, endpoint: &str, reply: Reply) -> Self {
        self.replies.insert(endpoint.to_string(), reply);
        self
    }

    pub fn calls(&self) -> Vec<(String, Vec<(String, String)>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn params_for(&self, endpoint: &str) -> HashMap<String, String> {
        self.calls()
            .into_iter()
            .find(|(e, _)| e == endpoint)
            .map(|(_, params)| params.into_iter().collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CivicTransport for FakeTransport {
    async fn get(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Vec<u8>> {
        self.calls.lock().unwrap().push((
            endpoint.to_string(),
            params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        ));

        match self.replies.get(endpoint) {
            Some(Reply::Json(value)) => Ok(serde_json::to_vec(value).unwrap()),
            Some(Reply::Body(body)) => Ok(body.as_bytes().to_vec()),
            Some(Reply::Status(status)) => Err(CivicError::Status { status: *status }),
            Some(Reply::Unreachable) | None => Err(CivicError::Transport {
                message: "connection refused".to_string(),
            }),
        }
    }
}

pub fn client_with(transport: FakeTransport) -> (CivicClient, Arc<FakeTransport>) {
    let transport = Arc::new(transport);
    let client = CivicClient::new(transport.clone(), TEST_KEY);
    (client, transport)
}
