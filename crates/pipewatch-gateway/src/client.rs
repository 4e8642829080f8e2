//! HTTP client for the payment provider.
//!
//! Uses Bearer auth against the provider's REST API. Outbound calls carry a
//! client-level timeout.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::error::GatewayError;
use crate::preference::{build_preference, PaymentRequest};
use crate::subscriptions::{SubscriptionLedger, SubscriptionStatus};
use crate::{plans, webhook};

/// Adapter configuration. The access token normally arrives via the
/// `MP_ACCESS_TOKEN` environment variable; without it the adapter stays
/// uninitialized and payment endpoints report the service unavailable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default)]
    pub access_token: Option<String>,
    /// Webhook callback URL registered with the provider.
    #[serde(default)]
    pub notification_url: Option<String>,
    #[serde(default = "GatewayConfig::default_site_base_url")]
    pub site_base_url: String,
    #[serde(default = "GatewayConfig::default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "GatewayConfig::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            notification_url: None,
            site_base_url: Self::default_site_base_url(),
            api_base_url: Self::default_api_base_url(),
            timeout_secs: Self::default_timeout_secs(),
        }
    }
}

impl GatewayConfig {
    fn default_site_base_url() -> String {
        "https://verificationsaas.com.br".to_string()
    }

    fn default_api_base_url() -> String {
        "https://api.mercadopago.com".to_string()
    }

    fn default_timeout_secs() -> u64 {
        10
    }

    pub fn is_configured(&self) -> bool {
        self.access_token.as_deref().is_some_and(|t| !t.trim().is_empty())
    }
}

/// Checkout links returned to the purchasing client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub payment_id: String,
    pub init_point: String,
    pub sandbox_init_point: String,
}

#[derive(Debug, Deserialize)]
struct PreferenceResponse {
    id: String,
    init_point: String,
    #[serde(default)]
    sandbox_init_point: String,
}

/// Payment gateway adapter.
pub struct PaymentGateway {
    cfg: GatewayConfig,
    client: reqwest::Client,
    subscriptions: SubscriptionLedger,
}

impl PaymentGateway {
    /// Build the adapter. Fails with `Unavailable` when no credential is
    /// configured.
    pub fn new(cfg: GatewayConfig) -> Result<Self, GatewayError> {
        if !cfg.is_configured() {
            return Err(GatewayError::Unavailable);
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .map_err(|e| GatewayError::CallFailed(e.to_string()))?;
        Ok(Self { cfg, client, subscriptions: SubscriptionLedger::default() })
    }

    pub fn subscriptions(&self) -> &SubscriptionLedger {
        &self.subscriptions
    }

    fn headers(&self) -> Result<HeaderMap, GatewayError> {
        let token = self.cfg.access_token.as_deref().ok_or(GatewayError::Unavailable)?;
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let bearer = format!("Bearer {token}");
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&bearer).map_err(|e| GatewayError::CallFailed(e.to_string()))?,
        );
        Ok(headers)
    }

    /// Create a checkout preference for a plan purchase.
    pub async fn create_payment(&self, req: &PaymentRequest) -> Result<CheckoutSession, GatewayError> {
        let plan = plans::lookup(&req.plan).ok_or(GatewayError::InvalidPlan)?;
        let preference = build_preference(req, &plan, &self.cfg);

        let url = format!("{}/checkout/preferences", self.cfg.api_base_url);
        let response = self
            .client
            .post(&url)
            .headers(self.headers()?)
            .json(&preference)
            .send()
            .await
            .map_err(|e| GatewayError::CallFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::CallFailed(format!("preference create {status}: {body}")));
        }

        let preference: PreferenceResponse =
            response.json().await.map_err(|e| GatewayError::CallFailed(e.to_string()))?;

        info!(email = %req.email, preference_id = %preference.id, "payment preference created");
        Ok(CheckoutSession {
            payment_id: preference.id,
            init_point: preference.init_point,
            sandbox_init_point: preference.sandbox_init_point,
        })
    }

    /// Look up the status of a payment by provider id.
    pub async fn payment_status(&self, payment_id: &str) -> Result<String, GatewayError> {
        let url = format!("{}/v1/payments/{payment_id}", self.cfg.api_base_url);
        let response = self
            .client
            .get(&url)
            .headers(self.headers()?)
            .send()
            .await
            .map_err(|e| GatewayError::CallFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GatewayError::CallFailed(format!("payment lookup {}", response.status())));
        }

        let body: Value =
            response.json().await.map_err(|e| GatewayError::CallFailed(e.to_string()))?;
        body.get("status")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| GatewayError::CallFailed("payment status missing".to_string()))
    }

    /// Drive the subscription state machine from a webhook notification.
    ///
    /// Payloads without a payment id are acknowledged and ignored, matching
    /// the provider's assorted notification types.
    pub async fn process_notification(
        &self,
        payload: &Value,
    ) -> Result<Option<SubscriptionStatus>, GatewayError> {
        let Some(payment_id) = webhook::payment_id(payload) else {
            warn!("webhook payload carried no payment id");
            return Ok(None);
        };

        let status = self.payment_status(&payment_id).await?;
        info!(%payment_id, %status, "payment status received");

        match status.as_str() {
            "approved" => Ok(Some(self.subscriptions.activate(&payment_id))),
            "cancelled" | "refunded" => Ok(Some(self.subscriptions.cancel(&payment_id))),
            _ => Ok(None),
        }
    }
}
