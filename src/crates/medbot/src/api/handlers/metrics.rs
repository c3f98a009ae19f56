use axum::{extract::State, Json};

use crate::api::models::MessageReply;
use crate::api::routes::AppState;
use crate::metrics::MetricsSnapshot;

/// Handler for GET /metrics
pub async fn metrics(State(state): State<AppState>) -> Json<MetricsSnapshot> {
    Json(state.metrics.snapshot())
}

/// Handler for POST /metrics/reset
pub async fn reset_metrics(State(state): State<AppState>) -> Json<MessageReply> {
    state.metrics.reset();
    Json(MessageReply::new("Metrics reset successfully"))
}
