use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
pub struct RawElections {
    #[serde(default)]
    pub elections: Vec<RawElection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawElection {
    #[serde(default, deserialize_with = "id_as_string")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub election_day: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElectionSummary {
    pub id: Option<String>,
    pub name: String,
    pub election_day: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElectionList {
    pub elections: Vec<ElectionSummary>,
}

// Upstream sends ids as strings; tolerate numbers and null.
fn id_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(id)) => Some(id),
        Some(Value::Number(id)) => Some(id.to_string()),
        _ => None,
    })
}

pub fn reshape(raw: RawElections) -> ElectionList {
    let elections = raw
        .elections
        .into_iter()
        .map(|e| ElectionSummary {
            id: e.id,
            name: e.name,
            election_day: e.election_day,
            description: e.description,
        })
        .collect();
    ElectionList { elections }
}

impl ElectionSummary {
    pub fn day(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.election_day, "%Y-%m-%d").ok()
    }
}

/// Picks the election a polling lookup should target.
///
/// The earliest election dated `today` or later wins. When no listed
/// election has a usable upcoming date the first listed one is used.
pub fn pick_upcoming(elections: &[ElectionSummary], today: NaiveDate) -> Option<&ElectionSummary> {
    elections
        .iter()
        .filter(|e| e.id.is_some())
        .filter_map(|e| e.day().filter(|day| *day >= today).map(|day| (day, e)))
        .min_by_key(|(day, _)| *day)
        .map(|(_, e)| e)
        .or_else(|| elections.iter().find(|e| e.id.is_some()))
}
