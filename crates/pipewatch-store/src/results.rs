//! Validation-result storage.
//!
//! Each pipeline's history is an append-only vector; results are also
//! indexed by their generated id so a single result can be fetched without
//! scanning every history.

use std::collections::HashMap;

use parking_lot::RwLock;
use uuid::Uuid;

use pipewatch_core::model::ValidationResult;

use crate::error::StoreError;

/// Default number of results returned by `list`.
pub const DEFAULT_RESULT_LIMIT: usize = 10;

#[derive(Default)]
struct ResultMap {
    by_pipeline: HashMap<String, Vec<ValidationResult>>,
    /// result id -> owning pipeline id.
    by_id: HashMap<Uuid, String>,
}

/// Mapping from pipeline id to its ordered result history.
#[derive(Default)]
pub struct ResultStore {
    inner: RwLock<ResultMap>,
}

impl ResultStore {
    /// Append to the end of the pipeline's history, creating it if absent.
    pub fn append(&self, result: ValidationResult) {
        let mut inner = self.inner.write();
        inner.by_id.insert(result.id, result.pipeline_id.clone());
        inner.by_pipeline.entry(result.pipeline_id.clone()).or_default().push(result);
    }

    /// The last `limit` results in chronological order. Empty when the
    /// pipeline has no history; callers decide whether the pipeline itself
    /// exists.
    pub fn list(&self, pipeline_id: &str, limit: usize) -> Vec<ValidationResult> {
        let inner = self.inner.read();
        match inner.by_pipeline.get(pipeline_id) {
            Some(history) => {
                let start = history.len().saturating_sub(limit);
                history[start..].to_vec()
            }
            None => Vec::new(),
        }
    }

    /// Fetch a single result by its generated id.
    pub fn get(&self, result_id: &Uuid) -> Result<ValidationResult, StoreError> {
        let inner = self.inner.read();
        let pipeline_id = inner.by_id.get(result_id).ok_or(StoreError::ResultNotFound)?;
        inner
            .by_pipeline
            .get(pipeline_id)
            .and_then(|history| history.iter().find(|r| &r.id == result_id))
            .cloned()
            .ok_or(StoreError::ResultNotFound)
    }

    /// Drop a pipeline's entire history. Idempotent.
    pub fn delete_all(&self, pipeline_id: &str) {
        let mut inner = self.inner.write();
        if let Some(history) = inner.by_pipeline.remove(pipeline_id) {
            for result in &history {
                inner.by_id.remove(&result.id);
            }
        }
    }
}
