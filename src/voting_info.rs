//! Static North Carolina voting guidance shown alongside the lookups.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Requirement {
    pub key: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ImportantDate {
    pub event: &'static str,
    pub date: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct VotingGuide {
    pub requirements: &'static [Requirement],
    pub steps: &'static [&'static str],
    pub dates: &'static [ImportantDate],
}

pub const REQUIREMENTS: &[Requirement] = &[
    Requirement { key: "age", description: "18 years old by election day" },
    Requirement { key: "citizenship", description: "U.S. citizen" },
    Requirement { key: "residence", description: "North Carolina resident" },
    Requirement { key: "registration", description: "Registered to vote 25 days before election" },
    Requirement {
        key: "id_required",
        description: "Photo ID required (with exceptions for reasonable impediment)",
    },
];

pub const VOTING_STEPS: &[&str] = &[
    "Check your voter registration status",
    "Find your polling location",
    "Bring acceptable photo ID",
    "Review your ballot before casting",
    "Submit your ballot",
];

pub const IMPORTANT_DATES: &[ImportantDate] = &[
    ImportantDate { event: "Voter Registration Deadline", date: "25 days before election" },
    ImportantDate { event: "Early Voting Period", date: "17 days before election" },
    ImportantDate {
        event: "Election Day",
        date: "First Tuesday after first Monday in November",
    },
];

/// Issues candidates are compared on.
pub const KEY_ISSUES: &[&str] = &[
    "Healthcare",
    "Education",
    "Economy",
    "Environment",
    "Infrastructure",
    "Public Safety",
    "Social Issues",
];

pub fn guide() -> VotingGuide {
    VotingGuide {
        requirements: REQUIREMENTS,
        steps: VOTING_STEPS,
        dates: IMPORTANT_DATES,
    }
}

pub fn requirement(key: &str) -> Option<&'static str> {
    REQUIREMENTS
        .iter()
        .find(|r| r.key == key)
        .map(|r| r.description)
}
