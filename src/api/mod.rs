pub mod routes;
pub mod models;
pub mod errors;

use std::sync::Arc;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use crate::config::TriageConfig;
use crate::decision::DecisionEngine;
use crate::errors::TriageError;
use crate::pipeline::EvidenceAggregator;

#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<EvidenceAggregator>,
    pub engine: Arc<DecisionEngine>,
}

impl AppState {
    pub fn new(aggregator: EvidenceAggregator, engine: DecisionEngine) -> Self {
        Self { aggregator: Arc::new(aggregator), engine: Arc::new(engine) }
    }
}

pub fn create_app_state(config: &TriageConfig) -> Result<AppState, TriageError> {
    let aggregator = EvidenceAggregator::from_config(config)?;
    Ok(AppState::new(aggregator, DecisionEngine::default()))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(routes::health::health_check))
        .route("/api/evidence/:id", get(routes::evidence::get_evidence))
        .route("/api/decide", post(routes::decide::post_decide))
        .route("/api/threats/:cwe", get(routes::threats::get_threat))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
