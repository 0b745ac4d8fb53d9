use crate::constants::{
    DEFAULT_CIVIC_API_BASE, DEFAULT_DATASET_ROOT, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_LOG_DIR,
    DEFAULT_LOG_FILE, DEFAULT_LOG_FILTER, PLACEHOLDER_CIVICS_API_KEY, PLACEHOLDER_MAPS_API_KEY,
};
use crate::dataset::RefreshPolicy;
use crate::error::{CivicError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_CONFIG_PATH: &str = "civic.toml";

/// Optional on-disk configuration. Every value may be overridden from the
/// environment.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub civic: CivicSection,
    pub maps: MapsSection,
    pub datasets: DatasetSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CivicSection {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub election_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MapsSection {
    pub api_key: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DatasetSection {
    pub root: Option<PathBuf>,
    pub refresh_seconds: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    pub dir: Option<PathBuf>,
    pub file: Option<String>,
    pub filter: Option<String>,
}

/// Settings for the civic-information gateway.
#[derive(Debug, Clone)]
pub struct CivicApiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
    pub election_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DatasetConfig {
    pub root: PathBuf,
    pub refresh: RefreshPolicy,
}

/// Where the daily JSON log goes and what it records when `RUST_LOG` is
/// unset.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    pub dir: PathBuf,
    pub file_name: String,
    pub filter: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub civic: CivicApiConfig,
    /// Reserved for the map front end; no gateway operation uses it.
    pub maps_api_key: Option<String>,
    pub datasets: DatasetConfig,
    pub logging: LoggingConfig,
}

impl FileConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CivicError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: FileConfig = toml::from_str(&content)?;
        Ok(config)
    }
}

impl Config {
    /// Loads `.env`, the optional TOML file and the process environment.
    ///
    /// `CIVIC_CONFIG` names the TOML file; without it `civic.toml` is used when
    /// it exists. The result is not validated; call [`Config::validate`] (or
    /// [`Config::validate_gateway`]) before using it.
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();

        let file = match std::env::var("CIVIC_CONFIG") {
            Ok(path) => FileConfig::from_path(Path::new(&path))?,
            Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                FileConfig::from_path(Path::new(DEFAULT_CONFIG_PATH))?
            }
            Err(_) => FileConfig::default(),
        };

        Self::from_sources(file, |name| std::env::var(name).ok())
    }

    /// Builds the configuration from a parsed file and an environment lookup.
    pub fn from_sources<F>(file: FileConfig, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |name: &str| env(name).filter(|v| !v.trim().is_empty());

        let timeout_secs = match env("CIVIC_HTTP_TIMEOUT_SECS") {
            Some(raw) => parse_u64("CIVIC_HTTP_TIMEOUT_SECS", &raw)?,
            None => file.civic.timeout_seconds.unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        let refresh_secs = match env("DATASET_REFRESH_SECS") {
            Some(raw) => Some(parse_u64("DATASET_REFRESH_SECS", &raw)?),
            None => file.datasets.refresh_seconds,
        };
        let refresh = match refresh_secs {
            Some(secs) => RefreshPolicy::Reload {
                ttl: Duration::from_secs(secs),
            },
            None => RefreshPolicy::LoadOnce,
        };

        let config = Config {
            civic: CivicApiConfig {
                api_key: env("CIVICS_API_KEY").or(file.civic.api_key),
                base_url: env("CIVIC_API_BASE_URL")
                    .or(file.civic.base_url)
                    .unwrap_or_else(|| DEFAULT_CIVIC_API_BASE.to_string()),
                timeout: Duration::from_secs(timeout_secs),
                election_id: env("CIVICS_ELECTION_ID").or(file.civic.election_id),
            },
            maps_api_key: env("GOOGLE_MAPS_API_KEY").or(file.maps.api_key),
            datasets: DatasetConfig {
                root: env("DATASET_ROOT")
                    .map(PathBuf::from)
                    .or(file.datasets.root)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET_ROOT)),
                refresh,
            },
            logging: LoggingConfig {
                dir: env("LOG_DIR")
                    .map(PathBuf::from)
                    .or(file.logging.dir)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR)),
                file_name: env("LOG_FILE")
                    .or(file.logging.file)
                    .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string()),
                filter: file
                    .logging
                    .filter
                    .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            },
        };

        debug!(
            base_url = %config.civic.base_url,
            dataset_root = %config.datasets.root.display(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Full startup validation: everything the gateway needs plus the
    /// optional maps key.
    pub fn validate(&self) -> Result<()> {
        self.validate_gateway()?;
        if let Some(key) = &self.maps_api_key {
            if key == PLACEHOLDER_MAPS_API_KEY {
                return Err(CivicError::Config(
                    "GOOGLE_MAPS_API_KEY is still the sample placeholder".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Validation required before any outbound call is made.
    pub fn validate_gateway(&self) -> Result<()> {
        match self.civic.api_key.as_deref() {
            None => {
                return Err(CivicError::Config(
                    "CIVICS_API_KEY is not set".to_string(),
                ))
            }
            Some(PLACEHOLDER_CIVICS_API_KEY) => {
                return Err(CivicError::Config(
                    "CIVICS_API_KEY is still the sample placeholder".to_string(),
                ))
            }
            Some(_) => {}
        }

        if self.civic.timeout.is_zero() {
            return Err(CivicError::Config(
                "CIVIC_HTTP_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        if self.civic.election_id.is_none() {
            warn!("No CIVICS_ELECTION_ID configured; polling lookups will discover the election");
        }
        Ok(())
    }

    /// The validated civic API key. Only meaningful after `validate_gateway`.
    pub fn civic_api_key(&self) -> Result<&str> {
        self.civic
            .api_key
            .as_deref()
            .ok_or_else(|| CivicError::Config("CIVICS_API_KEY is not set".to_string()))
    }
}

fn parse_u64(name: &str, raw: &str) -> Result<u64> {
    raw.trim()
        .parse()
        .map_err(|e| CivicError::Config(format!("{} must be a whole number: {}", name, e)))
}
