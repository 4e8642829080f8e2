//! Error taxonomy for store operations.

/// Store-level failures surfaced to the HTTP layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Pipeline not found")]
    PipelineNotFound,

    #[error("Pipeline already exists")]
    PipelineAlreadyExists,

    #[error("Result not found")]
    ResultNotFound,
}
