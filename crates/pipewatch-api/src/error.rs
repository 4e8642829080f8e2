use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::error;

use pipewatch_gateway::GatewayError;
use pipewatch_store::StoreError;

use crate::service::ServiceError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Payment service unavailable")]
    GatewayUnavailable,

    #[error("Failed to create payment")]
    GatewayFailed(String),

    #[error("Internal server error")]
    Internal(String),
}

/// Envelope for all handled failures.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: bool,
    pub message: String,
    pub timestamp: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::GatewayUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::GatewayFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Details stay in server-side logs; clients get the generic message.
        match &self {
            ApiError::GatewayFailed(detail) => error!(%detail, "payment gateway call failed"),
            ApiError::Internal(detail) => error!(%detail, "unhandled error"),
            _ => {}
        }

        let timestamp = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_else(|_| String::new());
        let body = ErrorBody { error: true, message: self.to_string(), timestamp };
        (self.status(), Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::PipelineNotFound | StoreError::ResultNotFound => {
                ApiError::NotFound(err.to_string())
            }
            StoreError::PipelineAlreadyExists => ApiError::BadRequest(err.to_string()),
        }
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::InvalidPlan => ApiError::BadRequest(err.to_string()),
            GatewayError::Unavailable => ApiError::GatewayUnavailable,
            GatewayError::CallFailed(detail) => ApiError::GatewayFailed(detail),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Store(e) => e.into(),
            ServiceError::Model(e) => ApiError::BadRequest(e.to_string()),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
