//! API route definitions

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::api::{handlers, middleware};
use crate::engine::Orchestrator;
use crate::metrics::MetricsRecorder;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
    pub metrics: MetricsRecorder,
    /// Service name reported by `GET /`
    pub name: String,
}

impl AppState {
    pub fn new(orchestrator: Arc<Orchestrator>, metrics: MetricsRecorder) -> Self {
        Self {
            orchestrator,
            metrics,
            name: "medbot".to_string(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// Build the complete API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/test_chat", post(handlers::test_chat))
        .route("/health_check", post(handlers::health_check))
        .route("/metrics", get(handlers::metrics))
        .route("/metrics/reset", post(handlers::reset_metrics))
        .route("/dashboard", get(handlers::dashboard))
        .route(
            "/history/:user_id",
            get(handlers::get_history).delete(handlers::clear_history),
        )
        .layer(middleware::logging_layer())
        .layer(middleware::cors_layer())
        .with_state(state)
}
