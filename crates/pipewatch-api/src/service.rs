//! Orchestration over the stores and the validation runner.
//!
//! Handlers stay thin; the rules live here: name validation on writes, id
//! immutability on update, cascade on delete, existence checks before
//! result listing, and the synthesized placeholder returned by a
//! validation trigger.

use std::sync::Arc;

use uuid::Uuid;

use pipewatch_core::model::{ModelError, Pipeline, ValidationResult};
use pipewatch_store::{Store, StoreError, DEFAULT_RESULT_LIMIT};

use crate::runner::ValidationRunner;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Model(#[from] ModelError),
}

#[derive(Clone)]
pub struct PipelineService {
    store: Arc<Store>,
    runner: Arc<ValidationRunner>,
}

impl PipelineService {
    pub fn new(store: Arc<Store>, runner: Arc<ValidationRunner>) -> Self {
        Self { store, runner }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn create(&self, pipeline: Pipeline) -> Result<Pipeline, ServiceError> {
        pipeline.validate()?;
        Ok(self.store.pipelines().create(pipeline)?)
    }

    pub fn list(&self) -> Vec<Pipeline> {
        self.store.pipelines().list()
    }

    pub fn get(&self, id: &str) -> Result<Pipeline, ServiceError> {
        Ok(self.store.pipelines().get(id)?)
    }

    pub fn update(&self, id: &str, pipeline: Pipeline) -> Result<Pipeline, ServiceError> {
        pipeline.validate()?;
        Ok(self.store.pipelines().update(id, pipeline)?)
    }

    pub fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.store.delete_pipeline(id)?;
        self.runner.retire(id);
        Ok(())
    }

    /// Schedule a validation run and return the synthesized `running`
    /// placeholder. The placeholder is never stored; clients poll
    /// `results` for the real outcome.
    pub fn trigger_validation(&self, id: &str) -> Result<ValidationResult, ServiceError> {
        if !self.store.pipelines().contains(id) {
            return Err(StoreError::PipelineNotFound.into());
        }
        self.runner.enqueue(id);
        Ok(ValidationResult::running_placeholder(id))
    }

    /// The last `limit` results, oldest first. Unknown pipelines are an
    /// error even when a result history happens to linger.
    pub fn results(&self, id: &str, limit: Option<usize>) -> Result<Vec<ValidationResult>, ServiceError> {
        if !self.store.pipelines().contains(id) {
            return Err(StoreError::PipelineNotFound.into());
        }
        Ok(self.store.results().list(id, limit.unwrap_or(DEFAULT_RESULT_LIMIT)))
    }

    pub fn result_by_id(&self, result_id: &Uuid) -> Result<ValidationResult, ServiceError> {
        Ok(self.store.results().get(result_id)?)
    }
}
