//! Request and response bodies

use crate::context::ConversationTurn;
use serde::{Deserialize, Serialize};

fn default_language() -> String {
    "en".to_string()
}

fn default_user_id() -> String {
    "stress_test".to_string()
}

/// Body of `POST /test_chat` and `POST /health_check`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub text: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_user_id")]
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthCheckReply {
    pub status: String,
    pub message: String,
    pub language: String,
    pub timestamp: String,
}

impl HealthCheckReply {
    pub fn echo(msg: &ChatMessage) -> Self {
        Self {
            status: "ok".to_string(),
            message: format!("Received: {}", msg.text),
            language: msg.language.clone(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootReply {
    pub message: String,
    pub metrics_url: String,
    pub dashboard_url: String,
}

/// Plain confirmation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageReply {
    pub message: String,
}

impl MessageReply {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryReply {
    pub user_id: String,
    pub turns: Vec<ConversationTurn>,
}
