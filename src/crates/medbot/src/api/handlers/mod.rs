//! Request handlers

mod chat;
mod dashboard;
mod health;
mod history;
mod metrics;

pub use chat::test_chat;
pub use dashboard::dashboard;
pub use health::{health_check, root};
pub use history::{clear_history, get_history};
pub use metrics::{metrics, reset_metrics};
