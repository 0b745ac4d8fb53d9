use crate::constants::{CANDIDATES_DATASET, GLOSSARY_DATASET};
use crate::error::{CivicError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Debug;

/// A single attribute value read from a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Integer(i64),
}

impl<'a> FieldValue<'a> {
    /// Reads a search value supplied as JSON: strings become text and
    /// whole numbers integers.
    pub fn from_json(value: &'a Value) -> Result<Self> {
        match value {
            Value::String(text) => Ok(FieldValue::Text(text)),
            Value::Number(n) => n
                .as_i64()
                .map(FieldValue::Integer)
                .ok_or_else(|| CivicError::UnsupportedValue(value.clone())),
            other => Err(CivicError::UnsupportedValue(other.clone())),
        }
    }

    pub fn to_json(self) -> Value {
        match self {
            FieldValue::Text(text) => Value::String(text.to_string()),
            FieldValue::Integer(n) => Value::from(n),
        }
    }

    /// Equality used by attribute search. Text compares case-insensitively
    /// unless `case_sensitive`; anything else compares by raw equality.
    pub fn matches(self, needle: FieldValue<'_>, case_sensitive: bool) -> bool {
        match (self, needle) {
            (FieldValue::Text(have), FieldValue::Text(want)) if !case_sensitive => {
                have.to_lowercase() == want.to_lowercase()
            }
            (FieldValue::Text(have), FieldValue::Text(want)) => have == want,
            (FieldValue::Integer(have), FieldValue::Integer(want)) => have == want,
            _ => false,
        }
    }
}

/// A record type stored in a JSON dataset file.
///
/// Projection and search go through explicit field selection: each record
/// type names its fields in `Field` and reads them with `get`.
pub trait Record: DeserializeOwned + Serialize + Clone + Debug + Send + Sync + 'static {
    type Field: Copy + Eq + Debug + Send + Sync + 'static;

    /// Dataset name, also the file stem under the dataset root.
    const DATASET: &'static str;

    fn all_fields() -> &'static [Self::Field];

    fn field_name(field: Self::Field) -> &'static str;

    fn get(&self, field: Self::Field) -> Option<FieldValue<'_>>;

    /// Keys the file carried beyond the typed fields, kept verbatim.
    fn extra(&self) -> &Map<String, Value>;

    fn parse_field(name: &str) -> Result<Self::Field> {
        Self::all_fields()
            .iter()
            .copied()
            .find(|f| Self::field_name(*f) == name)
            .ok_or_else(|| CivicError::UnknownField {
                dataset: Self::DATASET,
                field: name.to_string(),
            })
    }

    fn parse_fields<S: AsRef<str>>(names: &[S]) -> Result<Vec<Self::Field>> {
        names.iter().map(|n| Self::parse_field(n.as_ref())).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub office: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateField {
    Id,
    Name,
    Office,
    Party,
    District,
    Bio,
    Website,
}

impl Record for CandidateRecord {
    type Field = CandidateField;
    const DATASET: &'static str = CANDIDATES_DATASET;

    fn all_fields() -> &'static [CandidateField] {
        &[
            CandidateField::Id,
            CandidateField::Name,
            CandidateField::Office,
            CandidateField::Party,
            CandidateField::District,
            CandidateField::Bio,
            CandidateField::Website,
        ]
    }

    fn field_name(field: CandidateField) -> &'static str {
        match field {
            CandidateField::Id => "id",
            CandidateField::Name => "name",
            CandidateField::Office => "office",
            CandidateField::Party => "party",
            CandidateField::District => "district",
            CandidateField::Bio => "bio",
            CandidateField::Website => "website",
        }
    }

    fn get(&self, field: CandidateField) -> Option<FieldValue<'_>> {
        match field {
            CandidateField::Id => self.id.map(FieldValue::Integer),
            CandidateField::Name => Some(FieldValue::Text(&self.name)),
            CandidateField::Office => Some(FieldValue::Text(&self.office)),
            CandidateField::Party => self.party.as_deref().map(FieldValue::Text),
            CandidateField::District => self.district.as_deref().map(FieldValue::Text),
            CandidateField::Bio => self.bio.as_deref().map(FieldValue::Text),
            CandidateField::Website => self.website.as_deref().map(FieldValue::Text),
        }
    }

    fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlossaryTerm {
    pub term: String,
    pub definition: String,
    pub category: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlossaryField {
    Term,
    Definition,
    Category,
}

impl Record for GlossaryTerm {
    type Field = GlossaryField;
    const DATASET: &'static str = GLOSSARY_DATASET;

    fn all_fields() -> &'static [GlossaryField] {
        &[GlossaryField::Term, GlossaryField::Definition, GlossaryField::Category]
    }

    fn field_name(field: GlossaryField) -> &'static str {
        match field {
            GlossaryField::Term => "term",
            GlossaryField::Definition => "definition",
            GlossaryField::Category => "category",
        }
    }

    fn get(&self, field: GlossaryField) -> Option<FieldValue<'_>> {
        let value = match field {
            GlossaryField::Term => &self.term,
            GlossaryField::Definition => &self.definition,
            GlossaryField::Category => &self.category,
        };
        Some(FieldValue::Text(value))
    }

    fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}
