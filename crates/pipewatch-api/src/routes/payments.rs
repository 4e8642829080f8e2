use axum::extract::State;
use axum::Json;
use tracing::info;

use pipewatch_gateway::{CheckoutSession, PaymentRequest};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<PaymentRequest>,
) -> ApiResult<Json<CheckoutSession>> {
    let gateway = state.gateway.as_ref().ok_or(ApiError::GatewayUnavailable)?;
    let session = gateway.create_payment(&req).await?;
    info!(plan = %req.plan, payment_id = %session.payment_id, "payment created");
    Ok(Json(session))
}
