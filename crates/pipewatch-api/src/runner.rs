//! Background validation execution.
//!
//! One lane per pipeline id: a channel feeding a dedicated worker task, so
//! results for a pipeline append strictly in trigger order and two
//! validations for the same pipeline never run concurrently. Triggering
//! never blocks on the check computation.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use time::OffsetDateTime;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use pipewatch_core::model::ValidationResult;
use pipewatch_core::validation;
use pipewatch_core::Validator;
use pipewatch_store::Store;

const DEFAULT_RUN_TIMEOUT: Duration = Duration::from_secs(30);

pub struct ValidationRunner {
    store: Arc<Store>,
    validator: Arc<dyn Validator>,
    run_timeout: Duration,
    lanes: Mutex<HashMap<String, mpsc::UnboundedSender<()>>>,
}

impl ValidationRunner {
    pub fn new(store: Arc<Store>, validator: Arc<dyn Validator>) -> Self {
        Self::with_timeout(store, validator, DEFAULT_RUN_TIMEOUT)
    }

    pub fn with_timeout(store: Arc<Store>, validator: Arc<dyn Validator>, run_timeout: Duration) -> Self {
        Self { store, validator, run_timeout, lanes: Mutex::new(HashMap::new()) }
    }

    /// Schedule one validation run for the pipeline. Returns immediately.
    pub fn enqueue(&self, pipeline_id: &str) {
        let mut lanes = self.lanes.lock();
        let tx = lanes
            .entry(pipeline_id.to_string())
            .or_insert_with(|| self.spawn_lane(pipeline_id));
        if tx.send(()).is_err() {
            // The worker exited (lane retired earlier); start a fresh one.
            let tx = self.spawn_lane(pipeline_id);
            let _ = tx.send(());
            lanes.insert(pipeline_id.to_string(), tx);
        }
    }

    /// Drop a pipeline's lane. Queued jobs drain, then the worker exits;
    /// jobs for a deleted pipeline are discarded by the existence guard.
    pub fn retire(&self, pipeline_id: &str) {
        self.lanes.lock().remove(pipeline_id);
    }

    fn spawn_lane(&self, pipeline_id: &str) -> mpsc::UnboundedSender<()> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let store = Arc::clone(&self.store);
        let validator = Arc::clone(&self.validator);
        let run_timeout = self.run_timeout;
        let pipeline_id = pipeline_id.to_string();

        tokio::spawn(async move {
            while rx.recv().await.is_some() {
                run_one(&store, validator.as_ref(), &pipeline_id, run_timeout).await;
            }
        });
        tx
    }
}

async fn run_one(store: &Store, validator: &dyn Validator, pipeline_id: &str, run_timeout: Duration) {
    let Ok(pipeline) = store.pipelines().get(pipeline_id) else {
        warn!(%pipeline_id, "pipeline gone before validation started, skipping");
        return;
    };

    info!(%pipeline_id, "starting validation");

    let result = match tokio::time::timeout(run_timeout, validator.run_checks(&pipeline)).await {
        Ok(Ok(checks)) => validation::build_result(pipeline_id, checks),
        Ok(Err(err)) => {
            // Logged only; no result is appended and no error surfaces.
            error!(%pipeline_id, error = %err, "validation failed");
            return;
        }
        Err(_) => {
            error!(%pipeline_id, timeout = ?run_timeout, "validation timed out");
            ValidationResult::timed_out(pipeline_id)
        }
    };

    let status = result.status;
    let score = result.score;
    if store.record_result(result).is_err() {
        warn!(%pipeline_id, "pipeline deleted during validation, dropping result");
        return;
    }
    if let Err(e) = store.pipelines().set_last_check(pipeline_id, OffsetDateTime::now_utc()) {
        warn!(%pipeline_id, error = %e, "could not stamp last_check");
    }

    info!(%pipeline_id, ?status, score, "validation completed");
}
