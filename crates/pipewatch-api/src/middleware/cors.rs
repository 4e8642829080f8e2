use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

use crate::config::AppConfig;

/// Permissive in development, origin-restricted everywhere else.
pub fn layer(cfg: &AppConfig) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    if cfg.environment == "development" {
        return base.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = cfg
        .cors
        .allowed_origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = %o, "skipping unparseable CORS origin");
                None
            }
        })
        .collect();
    base.allow_origin(origins)
}
