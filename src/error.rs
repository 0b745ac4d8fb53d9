use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CivicError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {message}")]
    Transport { message: String },

    #[error("Upstream returned HTTP status {status}")]
    Status { status: u16 },

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Dataset file not found: {}", path.display())]
    DatasetNotFound { path: PathBuf },

    #[error("Dataset {} is not valid JSON for its schema: {source}", path.display())]
    InvalidDataset {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown dataset: {0}")]
    UnknownDataset(String),

    #[error("Unknown field '{field}' for dataset {dataset}")]
    UnknownField { dataset: &'static str, field: String },

    #[error("Search value must be a string or an integer, got {0}")]
    UnsupportedValue(serde_json::Value),
}

impl CivicError {
    /// True for failures reaching or hearing back from the upstream service,
    /// as opposed to failures while making sense of what it sent.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            CivicError::Http(_) | CivicError::Transport { .. } | CivicError::Status { .. }
        )
    }

    /// True when a dataset could not be read or parsed.
    pub fn is_data_unavailable(&self) -> bool {
        matches!(
            self,
            CivicError::DatasetNotFound { .. } | CivicError::InvalidDataset { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CivicError>;
