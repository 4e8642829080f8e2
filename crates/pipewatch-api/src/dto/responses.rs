use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfo {
    pub message: String,
    pub version: String,
    pub environment: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Health {
    pub status: String,
    pub service: String,
    pub timestamp: String,
}

/// Webhook acknowledgment. Always delivered with HTTP 200.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookAck {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl WebhookAck {
    pub fn received() -> Self {
        Self { status: "received".to_string(), message: None }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { status: "error".to_string(), message: Some(message.into()) }
    }
}
