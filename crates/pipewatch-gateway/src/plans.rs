//! Subscription plan price table.

/// Billing currency for all plans.
pub const CURRENCY: &str = "BRL";

/// A sellable subscription plan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plan {
    pub id: &'static str,
    /// Item title shown on the provider's checkout page.
    pub title: &'static str,
    pub unit_price: f64,
}

/// Look up a plan by its id. Unknown plans are rejected before any
/// provider call is made.
pub fn lookup(plan: &str) -> Option<Plan> {
    match plan {
        "basic" => Some(Plan { id: "basic", title: "Plano Basic", unit_price: 97.00 }),
        "pro" => Some(Plan { id: "pro", title: "Plano Pro", unit_price: 247.00 }),
        _ => None,
    }
}
