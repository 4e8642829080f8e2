//! Error taxonomy for the payment adapter.

/// Failures surfaced to the HTTP layer.
///
/// `CallFailed` keeps the provider detail for server-side logs; the
/// rendered message stays generic and never carries provider internals.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Invalid plan")]
    InvalidPlan,

    #[error("Payment service unavailable")]
    Unavailable,

    #[error("Failed to create payment")]
    CallFailed(String),
}
