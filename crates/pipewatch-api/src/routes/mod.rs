use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

mod payments;
mod pipelines;
mod results;
mod root;
mod webhook;

pub fn router() -> Router<AppState> {
    let api = Router::new()
        .route("/pipelines", post(pipelines::create).get(pipelines::list))
        .route(
            "/pipelines/:id",
            get(pipelines::get_one).put(pipelines::update).delete(pipelines::remove),
        )
        .route("/pipelines/:id/validate", post(pipelines::validate))
        .route("/pipelines/:id/results", get(pipelines::results))
        .route("/results/:result_id", get(results::get_one))
        .route("/payments/create", post(payments::create))
        .route("/webhook/mp", post(webhook::notify))
        .route("/webhook/mp/ipn", get(webhook::ipn));

    Router::new()
        .route("/", get(root::index))
        .route("/health", get(root::health))
        .nest("/api", api)
}
