use axum::extract::State;
use axum::Json;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::dto::responses::{Health, ServiceInfo};
use crate::state::AppState;

fn now_iso8601() -> String {
    OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default()
}

pub async fn index(State(state): State<AppState>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "Pipewatch API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.cfg.environment.clone(),
        timestamp: now_iso8601(),
    })
}

pub async fn health() -> Json<Health> {
    Json(Health {
        status: "healthy".to_string(),
        service: "pipewatch-api".to_string(),
        timestamp: now_iso8601(),
    })
}
