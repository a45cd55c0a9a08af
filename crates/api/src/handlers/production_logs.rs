//! Handlers for the `/lancamentos` resource (shift production logs).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bagline_core::error::CoreError;
use bagline_core::types::RecordId;
use bagline_db::models::production_log::{
    ProductionLog, ProductionLogInput, ProductionLogWithLoss,
};
use bagline_db::repositories::{ProductionLogFilter, ProductionLogRepo};

use crate::error::{AppError, AppResult};
use crate::query::LogListParams;
use crate::response::{no_store_json, NoStoreJson, SuccessResponse};
use crate::state::AppState;

fn not_found(id: RecordId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "ProductionLog",
        id: id.to_string(),
    })
}

/// POST /api/lancamentos
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<ProductionLogInput>,
) -> AppResult<(StatusCode, Json<SuccessResponse<RecordId>>)> {
    input.validate()?;
    let log = ProductionLogRepo::create(state.store(), input).await?;
    tracing::info!(
        id = %log.id,
        date = %log.date,
        produced_kg = log.produced_total,
        loss_kg = log.loss_total,
        "Production log created"
    );
    Ok((StatusCode::CREATED, Json(SuccessResponse::created(log.id))))
}

/// GET /api/lancamentos
///
/// Newest first, each entry with its loss percentage.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<LogListParams>,
) -> AppResult<NoStoreJson<Vec<ProductionLogWithLoss>>> {
    let filter = ProductionLogFilter {
        from: params.data_inicio,
        to: params.data_fim,
    };
    let logs = ProductionLogRepo::list(state.store(), filter).await?;
    Ok(no_store_json(logs.into_iter().map(Into::into).collect()))
}

/// GET /api/lancamentos/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<Json<ProductionLog>> {
    let log = ProductionLogRepo::find_by_id(state.store(), id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(log))
}

/// PUT /api/lancamentos/{id}
///
/// Full replacement; totals are recomputed from the new items and scrap.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    Json(input): Json<ProductionLogInput>,
) -> AppResult<Json<SuccessResponse>> {
    input.validate()?;
    let log = ProductionLogRepo::replace(state.store(), id, input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(id = %log.id, produced_kg = log.produced_total, "Production log replaced");
    Ok(Json(SuccessResponse::ok()))
}

/// DELETE /api/lancamentos/{id}
///
/// Succeeds whether or not the entry existed.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<Json<SuccessResponse>> {
    let deleted = ProductionLogRepo::delete(state.store(), id).await?;
    tracing::info!(%id, deleted, "Production log delete requested");
    Ok(Json(SuccessResponse::ok()))
}
