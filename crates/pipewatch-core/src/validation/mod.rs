//! Check evaluation and scoring rules.
//!
//! The [`Validator`] trait is the seam for real inspection logic
//! (reachability checks, config linting, CI API calls). Aggregation and
//! status derivation are fixed here so replacing the check set never
//! changes how an overall result is computed.

mod builtin;

pub use builtin::BuiltinValidator;

use async_trait::async_trait;

use crate::model::{CheckReport, Pipeline, ValidationResult, ValidationStatus};

/// Produces the check reports for one validation run.
#[async_trait]
pub trait Validator: Send + Sync {
    async fn run_checks(&self, pipeline: &Pipeline) -> anyhow::Result<Vec<CheckReport>>;
}

/// Arithmetic mean of the check scores. Zero when there are no checks.
pub fn mean_score(checks: &[CheckReport]) -> f64 {
    if checks.is_empty() {
        return 0.0;
    }
    checks.iter().map(|c| c.score).sum::<f64>() / checks.len() as f64
}

/// Overall status thresholds: >= 90 passed, >= 70 warning, otherwise failed.
pub fn status_for_score(score: f64) -> ValidationStatus {
    if score >= 90.0 {
        ValidationStatus::Passed
    } else if score >= 70.0 {
        ValidationStatus::Warning
    } else {
        ValidationStatus::Failed
    }
}

/// Aggregate a set of check reports into a stored result.
pub fn build_result(pipeline_id: &str, checks: Vec<CheckReport>) -> ValidationResult {
    let score = mean_score(&checks);
    ValidationResult::new(pipeline_id, status_for_score(score), checks, score)
}
