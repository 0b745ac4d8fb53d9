use crate::domain::{FieldValue, GlossaryTerm, Record};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// A record reduced to selected fields, keyed by field name.
pub type Projection = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    /// Stop at the first match instead of collecting all of them.
    pub unique: bool,
    pub case_sensitive: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            unique: true,
            case_sensitive: false,
        }
    }
}

impl MatchOptions {
    pub fn all() -> Self {
        Self {
            unique: false,
            ..Self::default()
        }
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }
}

/// Result of an attribute search. Serializes as the record (or `null`) for
/// unique searches and as an array otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Matches<R> {
    First(Option<R>),
    All(Vec<R>),
}

impl<R> Matches<R> {
    pub fn into_vec(self) -> Vec<R> {
        match self {
            Matches::First(found) => found.into_iter().collect(),
            Matches::All(found) => found,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Matches::First(found) => found.is_none(),
            Matches::All(found) => found.is_empty(),
        }
    }
}

/// Keeps only the requested fields each record actually has.
///
/// With no field list every present field is kept, along with any keys the
/// file carried beyond the typed fields, so each record comes back as it was
/// loaded.
pub fn project<R: Record>(records: &[R], fields: Option<&[R::Field]>) -> Vec<Projection> {
    records
        .iter()
        .map(|record| {
            let mut projection: Projection = fields
                .unwrap_or_else(|| R::all_fields())
                .iter()
                .filter_map(|&field| {
                    record
                        .get(field)
                        .map(|value| (R::field_name(field).to_string(), value.to_json()))
                })
                .collect();
            if fields.is_none() {
                projection.extend(record.extra().clone());
            }
            projection
        })
        .collect()
}

/// Scans records in order for `field == value`.
///
/// Records without the field never match.
pub fn find_by<R: Record>(
    records: &[R],
    field: R::Field,
    value: FieldValue<'_>,
    options: MatchOptions,
) -> Matches<R> {
    let mut hits = records.iter().filter(|record| {
        record
            .get(field)
            .is_some_and(|have| have.matches(value, options.case_sensitive))
    });

    if options.unique {
        Matches::First(hits.next().cloned())
    } else {
        Matches::All(hits.cloned().collect())
    }
}

/// Distinct glossary categories in sorted order.
pub fn glossary_categories(terms: &[GlossaryTerm]) -> Vec<String> {
    terms
        .iter()
        .map(|t| t.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Glossary terms ordered by term, optionally restricted to one category.
pub fn glossary_terms(terms: &[GlossaryTerm], category: Option<&str>) -> Vec<GlossaryTerm> {
    let mut selected: Vec<GlossaryTerm> = terms
        .iter()
        .filter(|t| category.map_or(true, |c| t.category == c))
        .cloned()
        .collect();
    selected.sort_by(|a, b| a.term.cmp(&b.term));
    selected
}
