use std::sync::Arc;

use tracing::info;

use pipewatch_core::model::seed_pipelines;
use pipewatch_core::BuiltinValidator;
use pipewatch_gateway::PaymentGateway;
use pipewatch_store::Store;

use crate::config::AppConfig;
use crate::runner::ValidationRunner;
use crate::service::PipelineService;

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<AppConfig>,
    pub service: PipelineService,
    pub gateway: Option<Arc<PaymentGateway>>,
}

impl AppState {
    pub fn new(cfg: AppConfig, gateway: Option<Arc<PaymentGateway>>) -> Self {
        let store = Store::new();
        seed(&store);

        let runner = Arc::new(ValidationRunner::new(Arc::clone(&store), Arc::new(BuiltinValidator)));
        let service = PipelineService::new(store, runner);

        Self { cfg: Arc::new(cfg), service, gateway }
    }
}

/// Insert the sample pipelines into an empty store.
fn seed(store: &Store) {
    if !store.pipelines().is_empty() {
        return;
    }
    for pipeline in seed_pipelines() {
        let id = pipeline.id.clone();
        if store.pipelines().create(pipeline).is_ok() {
            info!(pipeline_id = %id, "seeded sample pipeline");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_is_seeded_with_samples() {
        let state = AppState::new(AppConfig::default(), None);
        let ids: Vec<String> = state.service.list().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["p1", "p2", "p3"]);
    }

    #[test]
    fn seeding_a_populated_store_is_a_noop() {
        let store = Store::new();
        seed(&store);
        seed(&store);
        assert_eq!(store.pipelines().list().len(), 3);
    }
}
