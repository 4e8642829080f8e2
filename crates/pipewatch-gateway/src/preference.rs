//! Checkout-preference construction.
//!
//! Builds the provider's preference request from a plan purchase: line
//! item, payer identification (CPF for 11-digit documents, CNPJ
//! otherwise), name split, and the callback URLs.

use serde::{Deserialize, Serialize};

use crate::client::GatewayConfig;
use crate::plans::{Plan, CURRENCY};

/// Incoming plan-purchase request.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentRequest {
    pub plan: String,
    pub email: String,
    pub name: String,
    /// CPF or CNPJ.
    pub document: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PreferenceRequest {
    pub items: Vec<PreferenceItem>,
    pub payer: Payer,
    pub back_urls: BackUrls,
    pub auto_return: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PreferenceItem {
    pub title: String,
    pub quantity: u32,
    pub currency_id: String,
    pub unit_price: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Payer {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub identification: Identification,
}

#[derive(Debug, Clone, Serialize)]
pub struct Identification {
    #[serde(rename = "type")]
    pub kind: String,
    pub number: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BackUrls {
    pub success: String,
    pub failure: String,
    pub pending: String,
}

/// First whitespace-delimited token is the first name; the remainder,
/// joined by single spaces, is the last name (empty for one-token names).
pub fn split_name(name: &str) -> (String, String) {
    let mut tokens = name.split_whitespace();
    let first = tokens.next().unwrap_or_default().to_string();
    let last = tokens.collect::<Vec<_>>().join(" ");
    (first, last)
}

/// 11-digit documents are personal ids (CPF), anything else is an entity
/// id (CNPJ).
pub fn identification_type(document: &str) -> &'static str {
    if document.chars().count() == 11 {
        "CPF"
    } else {
        "CNPJ"
    }
}

pub fn build_preference(req: &PaymentRequest, plan: &Plan, cfg: &GatewayConfig) -> PreferenceRequest {
    let (first_name, last_name) = split_name(&req.name);
    PreferenceRequest {
        items: vec![PreferenceItem {
            title: plan.title.to_string(),
            quantity: 1,
            currency_id: CURRENCY.to_string(),
            unit_price: plan.unit_price,
        }],
        payer: Payer {
            email: req.email.clone(),
            first_name,
            last_name,
            identification: Identification {
                kind: identification_type(&req.document).to_string(),
                number: req.document.clone(),
            },
        },
        back_urls: BackUrls {
            success: format!("{}/success", cfg.site_base_url),
            failure: format!("{}/failure", cfg.site_base_url),
            pending: format!("{}/pending", cfg.site_base_url),
        },
        auto_return: "approved".to_string(),
        notification_url: cfg.notification_url.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plans;

    fn request() -> PaymentRequest {
        PaymentRequest {
            plan: "basic".to_string(),
            email: "ana@example.com".to_string(),
            name: "Ana Maria Souza".to_string(),
            document: "12345678901".to_string(),
        }
    }

    #[test]
    fn splits_name_on_first_token() {
        assert_eq!(split_name("Ana Maria Souza"), ("Ana".to_string(), "Maria Souza".to_string()));
        assert_eq!(split_name("Ana"), ("Ana".to_string(), String::new()));
        assert_eq!(split_name("  Ana   Souza "), ("Ana".to_string(), "Souza".to_string()));
    }

    #[test]
    fn document_length_picks_identification_type() {
        assert_eq!(identification_type("12345678901"), "CPF");
        assert_eq!(identification_type("12345678000195"), "CNPJ");
        assert_eq!(identification_type(""), "CNPJ");
    }

    #[test]
    fn preference_carries_plan_and_payer() {
        let cfg = GatewayConfig::default();
        let plan = plans::lookup("basic").unwrap();
        let pref = build_preference(&request(), &plan, &cfg);

        assert_eq!(pref.items.len(), 1);
        assert_eq!(pref.items[0].title, "Plano Basic");
        assert_eq!(pref.items[0].unit_price, 97.00);
        assert_eq!(pref.items[0].currency_id, "BRL");
        assert_eq!(pref.payer.first_name, "Ana");
        assert_eq!(pref.payer.last_name, "Maria Souza");
        assert_eq!(pref.payer.identification.kind, "CPF");
        assert_eq!(pref.auto_return, "approved");
        assert!(pref.back_urls.success.ends_with("/success"));
    }

    #[test]
    fn preference_serializes_identification_type_field() {
        let cfg = GatewayConfig::default();
        let plan = plans::lookup("pro").unwrap();
        let pref = build_preference(&request(), &plan, &cfg);

        let json = serde_json::to_value(&pref).unwrap();
        assert_eq!(json["payer"]["identification"]["type"], "CPF");
        assert_eq!(json["items"][0]["unit_price"], 247.0);
        assert!(json.get("notification_url").is_none());
    }
}
