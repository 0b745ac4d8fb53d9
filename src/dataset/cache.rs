use super::load_records;
use super::query::{self, Matches, MatchOptions, Projection};
use crate::domain::{FieldValue, GlossaryTerm, Record};
use crate::error::Result;
use crate::metrics::DatasetMetrics;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};
use tracing::debug;

/// When a cached dataset snapshot is re-read from disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshPolicy {
    /// Keep the first successful load for the life of the cache.
    LoadOnce,
    /// Re-read once the snapshot is older than `ttl`.
    Reload { ttl: Duration },
}

struct Snapshot<R> {
    records: Arc<Vec<R>>,
    loaded_at: Instant,
}

/// Immutable, shareable snapshot of one dataset.
pub struct DatasetCache<R: Record> {
    root: PathBuf,
    policy: RefreshPolicy,
    slot: RwLock<Option<Snapshot<R>>>,
}

impl<R: Record> DatasetCache<R> {
    pub fn new(root: &Path, policy: RefreshPolicy) -> Self {
        Self {
            root: root.to_path_buf(),
            policy,
            slot: RwLock::new(None),
        }
    }

    fn is_fresh(&self, snapshot: &Snapshot<R>) -> bool {
        match self.policy {
            RefreshPolicy::LoadOnce => true,
            RefreshPolicy::Reload { ttl } => snapshot.loaded_at.elapsed() < ttl,
        }
    }

    /// Current records, loading or reloading as the policy requires.
    ///
    /// A failed load clears the slot; the next call tries the file again.
    pub fn snapshot(&self) -> Result<Arc<Vec<R>>> {
        {
            let slot = self.slot.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(snapshot) = slot.as_ref().filter(|s| self.is_fresh(s)) {
                return Ok(Arc::clone(&snapshot.records));
            }
        }

        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        // Another caller may have loaded while we waited for the write lock
        if let Some(snapshot) = slot.as_ref().filter(|s| self.is_fresh(s)) {
            return Ok(Arc::clone(&snapshot.records));
        }

        match load_records::<R>(&self.root) {
            Ok(records) => {
                debug!(dataset = R::DATASET, records = records.len(), "Dataset snapshot refreshed");
                let records = Arc::new(records);
                *slot = Some(Snapshot {
                    records: Arc::clone(&records),
                    loaded_at: Instant::now(),
                });
                Ok(records)
            }
            Err(e) => {
                DatasetMetrics::record_load_error(R::DATASET);
                *slot = None;
                Err(e)
            }
        }
    }

    /// Drops the cached snapshot so the next read goes to disk.
    pub fn invalidate(&self) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// See [`query::project`].
    pub fn project_attributes(&self, fields: Option<&[R::Field]>) -> Result<Vec<Projection>> {
        Ok(query::project(&self.snapshot()?, fields))
    }

    /// See [`query::find_by`].
    pub fn find_by_attribute(
        &self,
        field: R::Field,
        value: FieldValue<'_>,
        options: MatchOptions,
    ) -> Result<Matches<R>> {
        Ok(query::find_by(&self.snapshot()?, field, value, options))
    }
}

impl DatasetCache<GlossaryTerm> {
    pub fn categories(&self) -> Result<Vec<String>> {
        Ok(query::glossary_categories(&self.snapshot()?))
    }

    /// All terms, or those of one category, ordered by term.
    pub fn terms(&self, category: Option<&str>) -> Result<Vec<GlossaryTerm>> {
        Ok(query::glossary_terms(&self.snapshot()?, category))
    }
}
