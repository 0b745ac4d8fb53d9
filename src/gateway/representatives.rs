use super::address::{format_address, AddressFields};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Default, Deserialize)]
pub struct RawRepresentatives {
    #[serde(default)]
    pub offices: Option<Vec<RawOffice>>,
    #[serde(default)]
    pub officials: Option<Vec<RawOfficial>>,
}

// Upstream may send `null` for any of these; `default` alone only covers a
// missing key.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOffice {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub official_indices: Option<Vec<usize>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOfficial {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub party: Option<String>,
    #[serde(default)]
    pub phones: Option<Vec<String>>,
    #[serde(default)]
    pub emails: Option<Vec<String>>,
    #[serde(default)]
    pub urls: Option<Vec<String>>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub address: Option<Vec<AddressFields>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Representative {
    pub name: String,
    pub office: String,
    pub party: String,
    pub phones: Vec<String>,
    pub emails: Vec<String>,
    pub urls: Vec<String>,
    pub photo_url: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepresentativeResult {
    pub representatives: Vec<Representative>,
}

/// Joins each office with the officials it references.
///
/// Offices are walked in order and, within an office, its indices in order.
/// An index past the end of `officials` is skipped.
pub fn reshape(raw: RawRepresentatives) -> RepresentativeResult {
    let mut representatives = Vec::new();

    if let (Some(offices), Some(officials)) = (raw.offices, raw.officials) {
        for office in &offices {
            let office_name = office.name.as_deref().unwrap_or_default();
            for &index in office.official_indices.as_deref().unwrap_or_default() {
                let Some(official) = officials.get(index) else {
                    debug!(office = %office_name, index, "Office references a missing official");
                    continue;
                };

                representatives.push(Representative {
                    name: official.name.clone().unwrap_or_default(),
                    office: office_name.to_string(),
                    party: official.party.clone().unwrap_or_default(),
                    phones: official.phones.clone().unwrap_or_default(),
                    emails: official.emails.clone().unwrap_or_default(),
                    urls: official.urls.clone().unwrap_or_default(),
                    photo_url: official.photo_url.clone().unwrap_or_default(),
                    address: format_address(official.address.as_deref().and_then(<[_]>::first)),
                });
            }
        }
    }

    RepresentativeResult { representatives }
}
