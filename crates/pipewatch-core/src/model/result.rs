//! Validation results and their constituent check reports.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Outcome of a validation run or a single check.
///
/// Stored results only ever carry `passed`, `warning` or `failed`;
/// `running` appears solely in the placeholder synthesized when a
/// validation is triggered, which is returned to the client but never
/// persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    Passed,
    Warning,
    Failed,
    Running,
}

/// One named sub-test contributing to a validation result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    pub name: String,
    pub status: ValidationStatus,
    pub details: String,
    /// 0-100.
    pub score: f64,
}

impl CheckReport {
    pub fn new(
        name: impl Into<String>,
        status: ValidationStatus,
        details: impl Into<String>,
        score: f64,
    ) -> Self {
        Self { name: name.into(), status, details: details.into(), score }
    }
}

/// One point-in-time assessment of a pipeline's health.
///
/// The `id` is generated at construction and indexes the result for direct
/// lookup; a pipeline's history is append-only and results are never
/// mutated once stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub pipeline_id: String,
    pub status: ValidationStatus,
    pub checks: Vec<CheckReport>,
    /// Arithmetic mean of the check scores, 0-100.
    pub score: f64,
    #[serde(with = "time::serde::rfc3339", default = "OffsetDateTime::now_utc")]
    pub generated_at: OffsetDateTime,
}

impl ValidationResult {
    pub fn new(
        pipeline_id: impl Into<String>,
        status: ValidationStatus,
        checks: Vec<CheckReport>,
        score: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            pipeline_id: pipeline_id.into(),
            status,
            checks,
            score,
            generated_at: OffsetDateTime::now_utc(),
        }
    }

    /// The immediate response to a validation trigger. Not stored.
    pub fn running_placeholder(pipeline_id: impl Into<String>) -> Self {
        Self::new(pipeline_id, ValidationStatus::Running, Vec::new(), 0.0)
    }

    /// Error-state result recorded when a validation run exceeds its
    /// deadline.
    pub fn timed_out(pipeline_id: impl Into<String>) -> Self {
        Self::new(pipeline_id, ValidationStatus::Failed, Vec::new(), 0.0)
    }
}
