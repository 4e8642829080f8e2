use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;

mod cors;
mod request_id;

pub fn wrap(router: Router, cfg: &AppConfig) -> Router {
    router
        .layer(request_id::layer())
        .layer(TraceLayer::new_for_http())
        .layer(cors::layer(cfg))
}
