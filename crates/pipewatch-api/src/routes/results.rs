use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use pipewatch_core::model::ValidationResult;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Fetch one validation result by its generated id.
///
/// A malformed id cannot name any stored result, so it reports not-found
/// rather than a parse error.
pub async fn get_one(
    State(state): State<AppState>,
    Path(result_id): Path<String>,
) -> ApiResult<Json<ValidationResult>> {
    let id = Uuid::parse_str(&result_id)
        .map_err(|_| ApiError::NotFound("Result not found".to_string()))?;
    Ok(Json(state.service.result_by_id(&id)?))
}
