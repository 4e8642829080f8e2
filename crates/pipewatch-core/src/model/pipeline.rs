//! Pipeline records.
//!
//! A pipeline is a named external process (CI/CD workflow, ETL job, data
//! job) registered for monitoring. The `id` is chosen by the client and is
//! immutable after creation; update paths must force the stored id back onto
//! any incoming record.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Minimum accepted pipeline name length.
pub const NAME_MIN: usize = 3;
/// Maximum accepted pipeline name length.
pub const NAME_MAX: usize = 100;

/// Validation failures for incoming pipeline records.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("pipeline name must be {NAME_MIN} to {NAME_MAX} characters")]
    NameLength,
}

/// A monitored pipeline.
///
/// The serde defaults let clients POST a record without timestamps; the
/// `checks` field is a legacy carry-over that is serialized but not
/// otherwise wired into the validation lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipeline {
    pub id: String,
    pub name: String,
    /// Conventional values: `cicd`, `etl`, `data_processing`. Free text is
    /// accepted; the set is deliberately open.
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(with = "time::serde::rfc3339", default = "OffsetDateTime::now_utc")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub last_check: Option<OffsetDateTime>,
    #[serde(default)]
    pub checks: Vec<serde_json::Value>,
}

fn default_status() -> String {
    "active".to_string()
}

impl Pipeline {
    /// Construct an active pipeline with a fresh creation timestamp.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: kind.into(),
            url: url.into(),
            status: default_status(),
            created_at: OffsetDateTime::now_utc(),
            last_check: None,
            checks: Vec::new(),
        }
    }

    /// Check the record against the name-length rule.
    pub fn validate(&self) -> Result<(), ModelError> {
        let len = self.name.chars().count();
        if !(NAME_MIN..=NAME_MAX).contains(&len) {
            return Err(ModelError::NameLength);
        }
        Ok(())
    }
}

/// The sample pipelines inserted into an empty store at startup.
pub fn seed_pipelines() -> Vec<Pipeline> {
    vec![
        Pipeline::new("p1", "CI/CD Pipeline", "cicd", "https://github.com/example/ci-cd"),
        Pipeline::new("p2", "ETL Job", "etl", "https://airflow.example.com/dag/etl"),
        Pipeline::new(
            "p3",
            "Data Processing",
            "data_processing",
            "https://spark.example.com/jobs/data",
        ),
    ]
}
