use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::{debug, info};

use crate::api::models::{ClassifyResponse, HealthResponse, SummaryResponse, TextRequest};
use crate::intelligence::config::is_truthy;
use crate::intelligence::{IntelligenceConfig, TextIntelligence};
use crate::metrics::METRICS;

/// Header that lets a single request opt out of remote generation
pub const USE_REMOTE_HEADER: &str = "X-Use-Remote";

/// Intelligence API state
#[derive(Clone)]
pub struct IntelligenceState {
    pub engine: Arc<TextIntelligence>,
}

/// Per-request configuration override.
///
/// Only opting out is honoured: a falsy `X-Use-Remote` header yields a
/// disabled copy of the engine configuration, anything else keeps the default.
fn remote_override(headers: &HeaderMap, base: &IntelligenceConfig) -> Option<IntelligenceConfig> {
    let value = headers.get(USE_REMOTE_HEADER)?.to_str().ok()?;
    if is_truthy(Some(value)) {
        return None;
    }
    Some(IntelligenceConfig {
        use_remote: false,
        ..base.clone()
    })
}

/// Liveness probe
///
/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

/// Summarize notification text
///
/// POST /summarize
pub async fn summarize(
    State(state): State<IntelligenceState>,
    headers: HeaderMap,
    Json(request): Json<TextRequest>,
) -> Json<SummaryResponse> {
    info!("Summarize request: {} chars", request.text.chars().count());

    let override_config = remote_override(&headers, state.engine.config());
    if override_config.is_some() {
        debug!("Remote generation disabled for this request via {}", USE_REMOTE_HEADER);
    }

    let summary = state
        .engine
        .summarize(&request.text, request.max_tokens, override_config.as_ref())
        .await;

    Json(SummaryResponse { summary })
}

/// Classify notification urgency
///
/// POST /classify
pub async fn classify(
    State(state): State<IntelligenceState>,
    headers: HeaderMap,
    Json(request): Json<TextRequest>,
) -> Json<ClassifyResponse> {
    let hints = request.hints.unwrap_or_default();
    info!(
        "Classify request: {} chars, {} hints",
        request.text.chars().count(),
        hints.len()
    );

    let override_config = remote_override(&headers, state.engine.config());
    let result = state
        .engine
        .classify(&request.text, &hints, override_config.as_ref())
        .await;

    Json(result.into())
}

/// Prometheus metrics
///
/// GET /metrics
pub async fn metrics() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        METRICS.export_prometheus(),
    )
}
