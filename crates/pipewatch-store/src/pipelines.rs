//! Pipeline record storage.

use std::collections::HashMap;

use parking_lot::RwLock;
use time::OffsetDateTime;

use pipewatch_core::model::Pipeline;

use crate::error::StoreError;

#[derive(Default)]
struct PipelineMap {
    records: HashMap<String, Pipeline>,
    /// Insertion order for `list`.
    order: Vec<String>,
}

/// Mapping from pipeline id to pipeline record.
#[derive(Default)]
pub struct PipelineStore {
    inner: RwLock<PipelineMap>,
}

impl PipelineStore {
    /// Insert a new record. Fails when the id is already present.
    pub fn create(&self, pipeline: Pipeline) -> Result<Pipeline, StoreError> {
        let mut inner = self.inner.write();
        if inner.records.contains_key(&pipeline.id) {
            return Err(StoreError::PipelineAlreadyExists);
        }
        inner.order.push(pipeline.id.clone());
        inner.records.insert(pipeline.id.clone(), pipeline.clone());
        Ok(pipeline)
    }

    pub fn get(&self, id: &str) -> Result<Pipeline, StoreError> {
        self.inner.read().records.get(id).cloned().ok_or(StoreError::PipelineNotFound)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.inner.read().records.contains_key(id)
    }

    /// All records in insertion order.
    pub fn list(&self) -> Vec<Pipeline> {
        let inner = self.inner.read();
        inner.order.iter().filter_map(|id| inner.records.get(id).cloned()).collect()
    }

    /// Replace a record's mutable fields. The stored id always wins over
    /// whatever id the incoming record carries.
    pub fn update(&self, id: &str, mut pipeline: Pipeline) -> Result<Pipeline, StoreError> {
        let mut inner = self.inner.write();
        if !inner.records.contains_key(id) {
            return Err(StoreError::PipelineNotFound);
        }
        pipeline.id = id.to_string();
        inner.records.insert(id.to_string(), pipeline.clone());
        Ok(pipeline)
    }

    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.write();
        if inner.records.remove(id).is_none() {
            return Err(StoreError::PipelineNotFound);
        }
        inner.order.retain(|x| x != id);
        Ok(())
    }

    /// Stamp the time of the most recent completed validation.
    pub fn set_last_check(&self, id: &str, at: OffsetDateTime) -> Result<(), StoreError> {
        let mut inner = self.inner.write();
        let record = inner.records.get_mut(id).ok_or(StoreError::PipelineNotFound)?;
        record.last_check = Some(at);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().records.is_empty()
    }
}
