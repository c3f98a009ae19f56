use axum::{extract::rejection::JsonRejection, extract::State, Json};
use std::time::Instant;
use tracing::{info_span, Instrument};
use uuid::Uuid;

use crate::api::error::ApiResult;
use crate::api::models::{ChatMessage, ChatReply};
use crate::api::routes::AppState;
use crate::responses::is_error_response;

/// Handler for POST /test_chat
///
/// Runs the full pipeline under a metrics timer. Replies that carry an
/// error prefix are counted as errors.
pub async fn test_chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatMessage>, JsonRejection>,
) -> ApiResult<Json<ChatReply>> {
    let Json(msg) = payload?;
    let request_id = Uuid::new_v4();

    let mut timer = state.metrics.start_request(msg.user_id.as_str(), msg.language.as_str());
    let started = Instant::now();

    let response = state
        .orchestrator
        .safe_generate(&msg.text, Some(&msg.user_id), &msg.language)
        .instrument(info_span!("test_chat", %request_id, user = %msg.user_id, language = %msg.language))
        .await;

    timer.set_generation_time(started.elapsed());
    if is_error_response(&response) {
        timer.mark_error();
    }
    timer.complete();

    Ok(Json(ChatReply { response }))
}
