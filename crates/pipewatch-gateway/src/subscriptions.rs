//! Subscription state tracked per payment id.
//!
//! The provider may deliver the same notification more than once;
//! transitions are idempotent so a duplicate `approved` event cannot
//! double-activate and a late event cannot resurrect a cancelled
//! subscription.

use std::collections::HashMap;

use parking_lot::Mutex;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Pending,
    Active,
    Cancelled,
}

/// In-memory ledger keyed by provider payment id.
#[derive(Default)]
pub struct SubscriptionLedger {
    inner: Mutex<HashMap<String, SubscriptionStatus>>,
}

impl SubscriptionLedger {
    /// `pending -> active`. Already-active entries are left untouched;
    /// cancelled is terminal.
    pub fn activate(&self, payment_id: &str) -> SubscriptionStatus {
        let mut inner = self.inner.lock();
        let entry = inner.entry(payment_id.to_string()).or_insert(SubscriptionStatus::Pending);
        if *entry == SubscriptionStatus::Pending {
            *entry = SubscriptionStatus::Active;
        }
        *entry
    }

    /// `pending|active -> cancelled`.
    pub fn cancel(&self, payment_id: &str) -> SubscriptionStatus {
        let mut inner = self.inner.lock();
        inner.insert(payment_id.to_string(), SubscriptionStatus::Cancelled);
        SubscriptionStatus::Cancelled
    }

    pub fn status_of(&self, payment_id: &str) -> Option<SubscriptionStatus> {
        self.inner.lock().get(payment_id).copied()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}
