//! Snooze API handlers

use super::models::*;
use super::store::{SnoozeStore, SnoozeStoreConfig};
use crate::api::models::{error_codes, ApiError};
use crate::error::SnoozeError;
use crate::metrics::METRICS;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

/// Application state for snooze handlers
#[derive(Clone)]
pub struct SnoozesState {
    pub store: Arc<dyn SnoozeStore>,
    pub config: SnoozeStoreConfig,
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

fn error_response(operation: &str, e: SnoozeError) -> (StatusCode, Json<ApiError>) {
    match e {
        SnoozeError::NotFound(id) => {
            warn!("Snooze {} failed: unknown id {}", operation, id);
            (
                StatusCode::NOT_FOUND,
                Json(ApiError::new(error_codes::NOT_FOUND, format!("Unknown snooze id: {}", id))),
            )
        }
        SnoozeError::Validation(message) => (
            StatusCode::BAD_REQUEST,
            Json(ApiError::new(error_codes::VALIDATION_ERROR, message)),
        ),
        other => {
            error!("Snooze {} failed: {}", operation, other);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::new(error_codes::INTERNAL_ERROR, other.to_string())),
            )
        }
    }
}

/// Store a snoozed notification
///
/// POST /store
pub async fn store_snooze(
    State(state): State<SnoozesState>,
    Json(request): Json<SnoozeStoreRequest>,
) -> ApiResult<SnoozeWriteResponse> {
    let start = Instant::now();
    info!("Snooze store request: id={}", request.id);

    let result = match validate_urgency(request.urgency) {
        Ok(()) => state.store.upsert(request).await,
        Err(e) => Err(e),
    };
    METRICS.record_snooze("store", result.is_ok(), start.elapsed().as_secs_f64());

    result
        .map(|id| Json(SnoozeWriteResponse::ok(id)))
        .map_err(|e| error_response("store", e))
}

/// List snoozed notifications, latest `snoozeUntil` first
///
/// GET /items
pub async fn list_snoozes(
    State(state): State<SnoozesState>,
    Query(query): Query<SnoozeListQuery>,
) -> ApiResult<SnoozeListResponse> {
    let start = Instant::now();
    let limit = state.config.effective_limit(query.limit);

    let result = state.store.list(limit).await;
    METRICS.record_snooze("list", result.is_ok(), start.elapsed().as_secs_f64());

    result
        .map(|records| {
            Json(SnoozeListResponse {
                items: records.into_iter().map(SnoozeListItem::from).collect(),
            })
        })
        .map_err(|e| error_response("list", e))
}

/// Partially update a snoozed notification
///
/// PATCH /store/:id
pub async fn update_snooze(
    State(state): State<SnoozesState>,
    Path(id): Path<String>,
    Json(update): Json<SnoozeUpdate>,
) -> ApiResult<SnoozeWriteResponse> {
    let start = Instant::now();
    info!("Snooze update request: id={}", id);

    let result = match validate_urgency(update.urgency) {
        Ok(()) => state.store.update(&id, update).await,
        Err(e) => Err(e),
    };
    METRICS.record_snooze("update", result.is_ok(), start.elapsed().as_secs_f64());

    result
        .map(|id| Json(SnoozeWriteResponse::ok(id)))
        .map_err(|e| error_response("update", e))
}

/// Delete a snoozed notification
///
/// DELETE /store/:id
pub async fn delete_snooze(
    State(state): State<SnoozesState>,
    Path(id): Path<String>,
) -> ApiResult<SnoozeWriteResponse> {
    let start = Instant::now();
    info!("Snooze delete request: id={}", id);

    let result = state.store.delete(&id).await;
    METRICS.record_snooze("delete", result.is_ok(), start.elapsed().as_secs_f64());

    result
        .map(|id| Json(SnoozeWriteResponse::ok(id)))
        .map_err(|e| error_response("delete", e))
}
