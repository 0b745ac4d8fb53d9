//! Local JSON datasets: loading, cached snapshots and queries.

pub mod cache;
pub mod query;

pub use cache::{DatasetCache, RefreshPolicy};
pub use query::{Matches, MatchOptions, Projection};

use crate::config::DatasetConfig;
use crate::constants::{CANDIDATES_DATASET, GLOSSARY_DATASET};
use crate::domain::{CandidateRecord, FieldValue, GlossaryTerm, Record};
use crate::error::{CivicError, Result};
use crate::metrics::DatasetMetrics;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// `<root>/<name>.json`
pub fn dataset_path(root: &Path, name: &str) -> Result<PathBuf> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if !valid {
        return Err(CivicError::UnknownDataset(name.to_string()));
    }
    Ok(root.join(format!("{}.json", name)))
}

/// Reads and parses a dataset file without interpreting its records.
pub fn load_dataset(root: &Path, name: &str) -> Result<Value> {
    let path = dataset_path(root, name)?;

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(path = %path.display(), "Dataset file was not found");
            return Err(CivicError::DatasetNotFound { path });
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Could not read dataset file");
            return Err(CivicError::Io(e));
        }
    };

    serde_json::from_str(&content).map_err(|source| {
        warn!(path = %path.display(), error = %source, "Dataset file is not valid JSON");
        CivicError::InvalidDataset { path, source }
    })
}

/// Loads a dataset and decodes its records.
///
/// The file holds either an array of records or an object wrapping that
/// array under the dataset's name.
pub fn load_records<R: Record>(root: &Path) -> Result<Vec<R>> {
    let value = load_dataset(root, R::DATASET)?;
    let path = dataset_path(root, R::DATASET)?;

    let records = match value {
        Value::Array(items) => Value::Array(items),
        Value::Object(mut wrapper) => match wrapper.remove(R::DATASET) {
            Some(records) => records,
            None => {
                return Err(invalid(
                    path,
                    format!("expected an array of records or a \"{}\" key", R::DATASET),
                ))
            }
        },
        _ => return Err(invalid(path, "expected an array of records".to_string())),
    };

    let records: Vec<R> = serde_json::from_value(records).map_err(|source| {
        warn!(path = %path.display(), error = %source, "Dataset records do not match their schema");
        CivicError::InvalidDataset {
            path: path.clone(),
            source,
        }
    })?;

    DatasetMetrics::record_load(R::DATASET, records.len());
    Ok(records)
}

fn invalid(path: PathBuf, message: String) -> CivicError {
    warn!(path = %path.display(), "{}", message);
    let source = <serde_json::Error as serde::de::Error>::custom(message);
    CivicError::InvalidDataset { path, source }
}

/// Search result from a name-addressed lookup; serializes as the inner
/// [`Matches`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DatasetMatches {
    Candidates(Matches<CandidateRecord>),
    Glossary(Matches<GlossaryTerm>),
}

impl DatasetMatches {
    pub fn is_empty(&self) -> bool {
        match self {
            DatasetMatches::Candidates(found) => found.is_empty(),
            DatasetMatches::Glossary(found) => found.is_empty(),
        }
    }
}

/// The datasets this service knows, each behind its own cache.
pub struct DatasetStore {
    root: PathBuf,
    candidates: DatasetCache<CandidateRecord>,
    glossary: DatasetCache<GlossaryTerm>,
}

impl DatasetStore {
    pub fn new(root: impl Into<PathBuf>, refresh: RefreshPolicy) -> Self {
        let root = root.into();
        Self {
            candidates: DatasetCache::new(&root, refresh),
            glossary: DatasetCache::new(&root, refresh),
            root,
        }
    }

    pub fn from_config(config: &DatasetConfig) -> Self {
        Self::new(config.root.clone(), config.refresh)
    }

    /// Loads every known dataset so a missing or broken file fails at startup.
    pub fn preload(&self) -> Result<()> {
        let candidates = self.candidates.snapshot()?;
        let glossary = self.glossary.snapshot()?;
        info!(
            root = %self.root.display(),
            candidates = candidates.len(),
            glossary = glossary.len(),
            "Datasets loaded"
        );
        Ok(())
    }

    /// Raw JSON of any dataset under the root, uncached.
    pub fn load_dataset(&self, name: &str) -> Result<Value> {
        load_dataset(&self.root, name)
    }

    pub fn candidates(&self) -> &DatasetCache<CandidateRecord> {
        &self.candidates
    }

    pub fn glossary(&self) -> &DatasetCache<GlossaryTerm> {
        &self.glossary
    }

    /// Projection addressed by dataset and field names, for callers that do
    /// not hold a typed cache.
    pub fn project_attributes<S: AsRef<str>>(
        &self,
        dataset: &str,
        attributes: Option<&[S]>,
    ) -> Result<Vec<Projection>> {
        match dataset {
            CANDIDATES_DATASET => {
                let fields = attributes.map(|names| CandidateRecord::parse_fields(names)).transpose()?;
                self.candidates.project_attributes(fields.as_deref())
            }
            GLOSSARY_DATASET => {
                let fields = attributes.map(|names| GlossaryTerm::parse_fields(names)).transpose()?;
                self.glossary.project_attributes(fields.as_deref())
            }
            other => Err(CivicError::UnknownDataset(other.to_string())),
        }
    }

    /// Attribute search addressed by dataset and field names.
    ///
    /// `value` is a JSON string or integer; text fields never equal an
    /// integer and the other way round.
    pub fn find_by_attribute(
        &self,
        dataset: &str,
        attribute: &str,
        value: &Value,
        options: MatchOptions,
    ) -> Result<DatasetMatches> {
        match dataset {
            CANDIDATES_DATASET => {
                let field = CandidateRecord::parse_field(attribute)?;
                let needle = FieldValue::from_json(value)?;
                let found = self.candidates.find_by_attribute(field, needle, options)?;
                Ok(DatasetMatches::Candidates(found))
            }
            GLOSSARY_DATASET => {
                let field = GlossaryTerm::parse_field(attribute)?;
                let needle = FieldValue::from_json(value)?;
                let found = self.glossary.find_by_attribute(field, needle, options)?;
                Ok(DatasetMatches::Glossary(found))
            }
            other => Err(CivicError::UnknownDataset(other.to_string())),
        }
    }

    pub fn glossary_categories(&self) -> Result<Vec<String>> {
        self.glossary.categories()
    }

    pub fn glossary_terms(&self, category: Option<&str>) -> Result<Vec<GlossaryTerm>> {
        self.glossary.terms(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_names_stay_inside_the_root() {
        let root = Path::new("/data");
        assert_eq!(
            dataset_path(root, "candidates").unwrap(),
            PathBuf::from("/data/candidates.json")
        );
        assert!(matches!(
            dataset_path(root, "../etc/passwd"),
            Err(CivicError::UnknownDataset(_))
        ));
        assert!(dataset_path(root, "").is_err());
    }
}
