use super::address::{format_address, AddressFields};
use crate::constants::{
    DEFAULT_EARLY_VOTE_SITE_NAME, DEFAULT_POLLING_HOURS, DEFAULT_POLLING_LOCATION_NAME,
    EARLY_VOTING_TYPE,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Subset of the `voterinfo` response that gets reshaped.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVoterInfo {
    #[serde(default)]
    pub polling_locations: Vec<RawPollingSite>,
    #[serde(default)]
    pub early_vote_sites: Vec<RawPollingSite>,
    #[serde(default)]
    pub election: Option<Map<String, Value>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPollingSite {
    #[serde(default)]
    pub address: Option<AddressFields>,
    #[serde(default)]
    pub polling_hours: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollingPlace {
    pub name: String,
    pub address: String,
    pub hours: String,
    pub notes: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub site_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollingLocationResult {
    pub polling_locations: Vec<PollingPlace>,
    pub early_vote_sites: Vec<PollingPlace>,
    pub election: Map<String, Value>,
}

impl RawPollingSite {
    fn into_place(self, default_name: &str, site_type: Option<&str>) -> PollingPlace {
        let name = self
            .address
            .as_ref()
            .and_then(|a| a.location_name.clone())
            .unwrap_or_else(|| default_name.to_string());

        PollingPlace {
            name,
            address: format_address(self.address.as_ref()),
            hours: self
                .polling_hours
                .unwrap_or_else(|| DEFAULT_POLLING_HOURS.to_string()),
            notes: self.notes.unwrap_or_default(),
            site_type: site_type.map(String::from),
        }
    }
}

pub fn reshape(raw: RawVoterInfo) -> PollingLocationResult {
    let polling_locations = raw
        .polling_locations
        .into_iter()
        .map(|site| site.into_place(DEFAULT_POLLING_LOCATION_NAME, None))
        .collect();

    let early_vote_sites = raw
        .early_vote_sites
        .into_iter()
        .map(|site| site.into_place(DEFAULT_EARLY_VOTE_SITE_NAME, Some(EARLY_VOTING_TYPE)))
        .collect();

    PollingLocationResult {
        polling_locations,
        early_vote_sites,
        election: raw.election.unwrap_or_default(),
    }
}
