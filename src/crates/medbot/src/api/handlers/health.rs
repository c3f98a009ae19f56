use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::api::error::ApiResult;
use crate::api::models::{ChatMessage, HealthCheckReply, RootReply};
use crate::api::routes::AppState;

/// Handler for GET /
pub async fn root(State(state): State<AppState>) -> Json<RootReply> {
    Json(RootReply {
        message: format!("{} is running.", state.name),
        metrics_url: "/metrics".to_string(),
        dashboard_url: "/dashboard".to_string(),
    })
}

/// Handler for POST /health_check
///
/// Echoes the message without touching any backend.
pub async fn health_check(payload: Result<Json<ChatMessage>, JsonRejection>) -> ApiResult<Json<HealthCheckReply>> {
    let Json(msg) = payload?;
    Ok(Json(HealthCheckReply::echo(&msg)))
}
