//! Gateway to the remote civic-information service.
//!
//! Every public operation returns a [`ResultEnvelope`]; transport and
//! reshaping failures are logged here and never reach the caller as errors.

pub mod address;
pub mod elections;
pub mod representatives;
pub mod voter_info;

pub use address::{format_address, AddressFields};
pub use elections::{ElectionList, ElectionSummary};
pub use representatives::{Representative, RepresentativeResult};
pub use voter_info::{PollingLocationResult, PollingPlace};

use crate::app::ports::CivicTransport;
use crate::config::Config;
use crate::constants::{
    ELECTIONS_ENDPOINT, ELECTIONS_UNAVAILABLE, POLLING_LOCATIONS_UNAVAILABLE,
    REPRESENTATIVES_ENDPOINT, REPRESENTATIVES_UNAVAILABLE, REPRESENTATIVE_LEVELS,
    REPRESENTATIVE_ROLES, UNEXPECTED_ERROR, VOTER_INFO_ENDPOINT,
};
use crate::envelope::ResultEnvelope;
use crate::error::Result;
use crate::infra::http_client::ReqwestTransport;
use crate::metrics::GatewayMetrics;
use chrono::Local;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// Which election a polling-location lookup targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElectionSelector {
    Id(String),
    /// Resolve through the elections listing.
    Discover,
}

#[derive(Debug, Clone, Copy)]
enum Lookup {
    PollingLocations,
    Representatives,
    Elections,
}

impl Lookup {
    fn name(self) -> &'static str {
        match self {
            Lookup::PollingLocations => "polling_locations",
            Lookup::Representatives => "representatives",
            Lookup::Elections => "elections",
        }
    }

    fn transport_message(self) -> &'static str {
        match self {
            Lookup::PollingLocations => POLLING_LOCATIONS_UNAVAILABLE,
            Lookup::Representatives => REPRESENTATIVES_UNAVAILABLE,
            Lookup::Elections => ELECTIONS_UNAVAILABLE,
        }
    }

    fn into_envelope<T>(self, result: Result<T>) -> ResultEnvelope<T> {
        match result {
            Ok(payload) => ResultEnvelope::Success(payload),
            Err(e) if e.is_transport() => {
                error!("Error fetching {}: {}", self.name(), e);
                GatewayMetrics::record_failure(self.name(), "transport");
                ResultEnvelope::failure(self.transport_message())
            }
            Err(e) => {
                error!("Unexpected error fetching {}: {}", self.name(), e);
                GatewayMetrics::record_failure(self.name(), "unexpected");
                ResultEnvelope::failure(UNEXPECTED_ERROR)
            }
        }
    }
}

pub struct CivicClient {
    transport: Arc<dyn CivicTransport>,
    api_key: String,
    default_election: Option<String>,
}

impl CivicClient {
    pub fn new(transport: Arc<dyn CivicTransport>, api_key: impl Into<String>) -> Self {
        Self {
            transport,
            api_key: api_key.into(),
            default_election: None,
        }
    }

    /// Builds a client over HTTP after validating the gateway settings.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate_gateway()?;
        let transport = ReqwestTransport::new(&config.civic.base_url, config.civic.timeout)?;
        let client = Self::new(Arc::new(transport), config.civic_api_key()?)
            .with_default_election(config.civic.election_id.clone());
        Ok(client)
    }

    pub fn with_default_election(mut self, election_id: Option<String>) -> Self {
        self.default_election = election_id;
        self
    }

    /// The configured election, or discovery when none is configured.
    pub fn default_selector(&self) -> ElectionSelector {
        match &self.default_election {
            Some(id) => ElectionSelector::Id(id.clone()),
            None => ElectionSelector::Discover,
        }
    }

    #[instrument(skip(self, address))]
    pub async fn fetch_polling_locations(
        &self,
        address: &str,
        election: ElectionSelector,
    ) -> ResultEnvelope<PollingLocationResult> {
        let lookup = Lookup::PollingLocations;
        GatewayMetrics::record_request(lookup.name());
        lookup.into_envelope(self.load_polling_locations(address, election).await)
    }

    async fn load_polling_locations(
        &self,
        address: &str,
        election: ElectionSelector,
    ) -> Result<PollingLocationResult> {
        let election_id = self.resolve_election(election).await?;

        let mut params = vec![("key", self.api_key.as_str()), ("address", address)];
        if let Some(id) = election_id.as_deref() {
            params.push(("electionId", id));
        }

        let raw: voter_info::RawVoterInfo = self.get_json(VOTER_INFO_ENDPOINT, &params).await?;
        let result = voter_info::reshape(raw);
        info!(
            polling_locations = result.polling_locations.len(),
            early_vote_sites = result.early_vote_sites.len(),
            "Fetched polling locations"
        );
        Ok(result)
    }

    #[instrument(skip(self, address))]
    pub async fn fetch_representatives(&self, address: &str) -> ResultEnvelope<RepresentativeResult> {
        let lookup = Lookup::Representatives;
        GatewayMetrics::record_request(lookup.name());

        let params = [
            ("key", self.api_key.as_str()),
            ("address", address),
            ("levels", REPRESENTATIVE_LEVELS),
            ("roles", REPRESENTATIVE_ROLES),
        ];

        let result = self
            .get_json::<representatives::RawRepresentatives>(REPRESENTATIVES_ENDPOINT, &params)
            .await
            .map(representatives::reshape);

        if let Ok(found) = &result {
            info!(count = found.representatives.len(), "Fetched representatives");
        }
        lookup.into_envelope(result)
    }

    #[instrument(skip(self))]
    pub async fn fetch_elections(&self) -> ResultEnvelope<ElectionList> {
        let lookup = Lookup::Elections;
        GatewayMetrics::record_request(lookup.name());
        lookup.into_envelope(self.load_elections().await)
    }

    async fn load_elections(&self) -> Result<ElectionList> {
        let params = [("key", self.api_key.as_str())];
        let raw: elections::RawElections = self.get_json(ELECTIONS_ENDPOINT, &params).await?;
        Ok(elections::reshape(raw))
    }

    async fn resolve_election(&self, selector: ElectionSelector) -> Result<Option<String>> {
        match selector {
            ElectionSelector::Id(id) => Ok(Some(id)),
            ElectionSelector::Discover => {
                let list = self.load_elections().await?;
                let picked = elections::pick_upcoming(&list.elections, Local::now().date_naive());
                match picked {
                    Some(election) => {
                        info!(election_id = ?election.id, name = %election.name, "Discovered election");
                        Ok(election.id.clone())
                    }
                    None => {
                        debug!("No elections listed; letting the service choose");
                        Ok(None)
                    }
                }
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<T> {
        let body = self.transport.get(endpoint, params).await?;
        debug!(endpoint, bytes = body.len(), "Received response");
        Ok(serde_json::from_slice(&body)?)
    }
}
