use axum::extract::{Path, Query, State};
use axum::Json;
use tracing::info;

use pipewatch_core::model::{Pipeline, ValidationResult};

use crate::dto::requests::ResultsQuery;
use crate::dto::responses::MessageResponse;
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn create(
    State(state): State<AppState>,
    Json(pipeline): Json<Pipeline>,
) -> ApiResult<Json<Pipeline>> {
    let created = state.service.create(pipeline)?;
    info!(pipeline_id = %created.id, "pipeline created");
    Ok(Json(created))
}

pub async fn list(State(state): State<AppState>) -> Json<Vec<Pipeline>> {
    Json(state.service.list())
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Pipeline>> {
    Ok(Json(state.service.get(&id)?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(pipeline): Json<Pipeline>,
) -> ApiResult<Json<MessageResponse>> {
    state.service.update(&id, pipeline)?;
    info!(pipeline_id = %id, "pipeline updated");
    Ok(Json(MessageResponse::new("Pipeline updated successfully")))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state.service.delete(&id)?;
    info!(pipeline_id = %id, "pipeline deleted");
    Ok(Json(MessageResponse::new("Pipeline deleted successfully")))
}

pub async fn validate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ValidationResult>> {
    let placeholder = state.service.trigger_validation(&id)?;
    info!(pipeline_id = %id, "validation scheduled");
    Ok(Json(placeholder))
}

pub async fn results(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ResultsQuery>,
) -> ApiResult<Json<Vec<ValidationResult>>> {
    Ok(Json(state.service.results(&id, query.limit)?))
}
