//! Record types shared across the service.

mod pipeline;
mod result;

pub use pipeline::{seed_pipelines, ModelError, Pipeline, NAME_MAX, NAME_MIN};
pub use result::{CheckReport, ValidationResult, ValidationStatus};
