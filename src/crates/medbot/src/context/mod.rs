//! Per-user conversation state

pub mod history;

pub use history::{ConversationHistory, ConversationTurn, Role, DEFAULT_MAX_TURNS};
