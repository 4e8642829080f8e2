//! In-memory storage for pipewatch.
//!
//! Two stores, each guarding its mapping with a lock so the operations are
//! atomic with respect to one another: the pipeline store owns pipeline
//! records, the result store owns each pipeline's append-only result
//! history. Nothing here is durable; a persistent backend can replace the
//! internals without changing callers.

pub mod error;
pub mod pipelines;
pub mod results;

use std::sync::Arc;

use pipewatch_core::model::ValidationResult;

pub use error::StoreError;
pub use pipelines::PipelineStore;
pub use results::{ResultStore, DEFAULT_RESULT_LIMIT};

/// Aggregate handle over both stores.
#[derive(Default)]
pub struct Store {
    pipelines: PipelineStore,
    results: ResultStore,
}

impl Store {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn pipelines(&self) -> &PipelineStore {
        &self.pipelines
    }

    pub fn results(&self) -> &ResultStore {
        &self.results
    }

    /// Append a validation result for a pipeline that still exists.
    ///
    /// The pipeline and result stores lock independently, so a
    /// `delete_pipeline` can land between an existence check and the
    /// append. This re-checks after writing and removes the history again
    /// if the pipeline vanished, so a deleted id never keeps orphaned
    /// results that would resurface on re-creation.
    pub fn record_result(&self, result: ValidationResult) -> Result<(), StoreError> {
        if !self.pipelines.contains(&result.pipeline_id) {
            return Err(StoreError::PipelineNotFound);
        }
        let pipeline_id = result.pipeline_id.clone();
        self.results.append(result);
        if !self.pipelines.contains(&pipeline_id) {
            self.results.delete_all(&pipeline_id);
            return Err(StoreError::PipelineNotFound);
        }
        Ok(())
    }

    /// Remove a pipeline and cascade to its result history.
    pub fn delete_pipeline(&self, id: &str) -> Result<(), StoreError> {
        self.pipelines.delete(id)?;
        self.results.delete_all(id);
        Ok(())
    }
}
