//! HTTP surface for medbot
//!
//! - `POST /test_chat` - full pipeline, timed into the metrics
//! - `POST /health_check` - echo without backend calls
//! - `GET /metrics`, `POST /metrics/reset` - aggregate statistics
//! - `GET /dashboard` - monitoring page polling `/metrics`
//! - `GET|DELETE /history/:user_id` - per-user conversation log

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;

pub use error::{ApiError, ApiErrorResponse, ApiResult};
pub use middleware::{cors_layer, logging_layer};
pub use routes::{create_router, AppState};
