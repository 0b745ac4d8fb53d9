/// Upstream endpoint and message constants shared by the gateway and CLI.

pub const DEFAULT_CIVIC_API_BASE: &str = "https://www.googleapis.com/civicinfo/v2";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_DATASET_ROOT: &str = "data";
pub const DEFAULT_LOG_DIR: &str = "logs";
pub const DEFAULT_LOG_FILE: &str = "civic-info.log";
pub const DEFAULT_LOG_FILTER: &str = "civic_info=info,warn";

// Endpoint paths relative to the API base
pub const VOTER_INFO_ENDPOINT: &str = "voterinfo";
pub const REPRESENTATIVES_ENDPOINT: &str = "representatives";
pub const ELECTIONS_ENDPOINT: &str = "elections";

pub const REPRESENTATIVE_LEVELS: &str = "country,administrativeArea1,administrativeArea2,locality";
pub const REPRESENTATIVE_ROLES: &str = "legislatorUpperBody,legislatorLowerBody,executiveHead";

// Fallback values used while reshaping upstream payloads
pub const DEFAULT_POLLING_LOCATION_NAME: &str = "Polling Location";
pub const DEFAULT_EARLY_VOTE_SITE_NAME: &str = "Early Voting Site";
pub const DEFAULT_POLLING_HOURS: &str = "Check local listings";
pub const EARLY_VOTING_TYPE: &str = "early_voting";

// User-facing failure messages
pub const POLLING_LOCATIONS_UNAVAILABLE: &str =
    "Unable to fetch polling locations. Please try again later.";
pub const REPRESENTATIVES_UNAVAILABLE: &str =
    "Unable to fetch representatives. Please try again later.";
pub const ELECTIONS_UNAVAILABLE: &str = "Unable to fetch elections. Please try again later.";
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred.";

// Placeholder keys shipped in sample configuration; never valid upstream
pub const PLACEHOLDER_CIVICS_API_KEY: &str = "your_google_civics_api_key";
pub const PLACEHOLDER_MAPS_API_KEY: &str = "your_google_maps_api_key";

// Dataset names under the dataset root
pub const CANDIDATES_DATASET: &str = "candidates";
pub const GLOSSARY_DATASET: &str = "glossary";
