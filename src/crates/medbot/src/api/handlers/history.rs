use axum::{
    extract::{Path, State},
    Json,
};

use crate::api::error::{ApiError, ApiResult};
use crate::api::models::{HistoryReply, MessageReply};
use crate::api::routes::AppState;

/// Handler for GET /history/:user_id
///
/// Unknown users have an empty history rather than a 404.
pub async fn get_history(State(state): State<AppState>, Path(user_id): Path<String>) -> Json<HistoryReply> {
    let turns = state.orchestrator.history().turns(&user_id);
    Json(HistoryReply { user_id, turns })
}

/// Handler for DELETE /history/:user_id
pub async fn clear_history(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<MessageReply>> {
    if state.orchestrator.history().clear_user(&user_id) {
        Ok(Json(MessageReply::new(format!("History cleared for {}", user_id))))
    } else {
        Err(ApiError::NotFound(format!("no history for user {}", user_id)))
    }
}
