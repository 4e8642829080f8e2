//! The built-in check set.
//!
//! These reports are fixed constants; no external system is contacted.
//! Real inspection logic replaces this validator without touching the
//! aggregation rules in the parent module.

use async_trait::async_trait;

use crate::model::{CheckReport, Pipeline, ValidationStatus};

use super::Validator;

/// Simulated validator returning four fixed checks.
#[derive(Debug, Default)]
pub struct BuiltinValidator;

#[async_trait]
impl Validator for BuiltinValidator {
    async fn run_checks(&self, _pipeline: &Pipeline) -> anyhow::Result<Vec<CheckReport>> {
        Ok(builtin_checks())
    }
}

pub(crate) fn builtin_checks() -> Vec<CheckReport> {
    vec![
        CheckReport::new(
            "CI/CD Workflow",
            ValidationStatus::Passed,
            "All stages completed successfully",
            100.0,
        ),
        CheckReport::new(
            "Security Scan",
            ValidationStatus::Passed,
            "No vulnerabilities found",
            95.0,
        ),
        CheckReport::new(
            "Performance Test",
            ValidationStatus::Warning,
            "Some tests exceeded time limits",
            85.0,
        ),
        CheckReport::new(
            "Code Quality",
            ValidationStatus::Passed,
            "All quality gates passed",
            92.0,
        ),
    ]
}
