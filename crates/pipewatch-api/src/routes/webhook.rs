//! Payment-provider callbacks.
//!
//! These handlers never fail outward: every processing error degrades to a
//! 200-level `{status: "error"}` body. The body is taken raw instead of
//! through the `Json` extractor so malformed payloads land in the soft
//! path too.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::Json;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::dto::responses::WebhookAck;
use crate::state::AppState;

pub async fn notify(State(state): State<AppState>, body: String) -> Json<WebhookAck> {
    let payload: Value = match serde_json::from_str(&body) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "webhook payload is not valid json");
            return Json(WebhookAck::error(format!("invalid payload: {e}")));
        }
    };

    info!(payload = %payload, "webhook received");

    let Some(gateway) = state.gateway.as_ref() else {
        // Nothing to act on without a configured gateway.
        warn!("webhook received but payment gateway is not configured");
        return Json(WebhookAck::received());
    };

    match gateway.process_notification(&payload).await {
        Ok(outcome) => {
            if let Some(status) = outcome {
                info!(?status, "subscription updated from webhook");
            }
            Json(WebhookAck::received())
        }
        Err(e) => {
            error!(error = %e, "webhook processing failed");
            Json(WebhookAck::error(e.to_string()))
        }
    }
}

/// Legacy IPN callback delivered via query parameters.
pub async fn ipn(Query(params): Query<HashMap<String, String>>) -> Json<WebhookAck> {
    info!(?params, "ipn received");
    Json(WebhookAck::received())
}
