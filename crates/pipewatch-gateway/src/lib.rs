//! Mercado Pago payment adapter.
//!
//! Translates plan purchases into the provider's checkout-preference format,
//! relays webhook notifications, and tracks subscription state per payment
//! id. The provider's wire shapes are treated as an opaque external
//! contract; nothing here reimplements provider behavior.

pub mod client;
pub mod error;
pub mod plans;
pub mod preference;
pub mod subscriptions;
pub mod webhook;

pub use client::{CheckoutSession, GatewayConfig, PaymentGateway};
pub use error::GatewayError;
pub use plans::Plan;
pub use preference::PaymentRequest;
pub use subscriptions::{SubscriptionLedger, SubscriptionStatus};
