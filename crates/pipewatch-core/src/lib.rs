//! Domain model and validation rules for pipewatch.
//!
//! This crate holds the serializable record types (pipelines, validation
//! results, checks) and the scoring rules that turn a set of check reports
//! into an overall result. It performs no I/O; running checks and storing
//! results belong to the callers.

pub mod model;
pub mod validation;

pub use model::{CheckReport, ModelError, Pipeline, ValidationResult, ValidationStatus};
pub use validation::{BuiltinValidator, Validator};
