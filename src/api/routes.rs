//! Router construction

use axum::{
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::api::handlers::{self, IntelligenceState};
use crate::config::Config;
use crate::intelligence::{IntelligenceConfig, RemoteError, TextIntelligence};
use crate::snoozes::{self, InMemorySnoozeStore, SnoozeStore, SnoozesState};

/// Build the summarize/classify routes
pub fn build_intelligence_routes(state: IntelligenceState) -> Router {
    Router::new()
        .route("/summarize", post(handlers::summarize))
        .route("/classify", post(handlers::classify))
        .with_state(state)
}

/// Build the snooze storage routes
pub fn build_snooze_routes(state: SnoozesState) -> Router {
    Router::new()
        .route("/store", post(snoozes::store_snooze))
        .route(
            "/store/:id",
            patch(snoozes::update_snooze).delete(snoozes::delete_snooze),
        )
        .route("/items", get(snoozes::list_snoozes))
        .with_state(state)
}

/// Build the complete router with shared middleware
pub fn build_router(
    intelligence: IntelligenceState,
    snoozes: SnoozesState,
    max_body_bytes: usize,
) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .merge(build_intelligence_routes(intelligence))
        .merge(build_snooze_routes(snoozes))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(max_body_bytes)),
        )
}

/// Wire engine, store and router from configuration
pub fn init_router(
    config: &Config,
    intelligence_config: IntelligenceConfig,
) -> Result<Router, RemoteError> {
    let engine = TextIntelligence::from_config(intelligence_config)?;
    let store: Arc<dyn SnoozeStore> = Arc::new(InMemorySnoozeStore::new(config.store.clone()));

    Ok(build_router(
        IntelligenceState {
            engine: Arc::new(engine),
        },
        SnoozesState {
            store,
            config: config.store.clone(),
        },
        config.server.max_body_bytes,
    ))
}
