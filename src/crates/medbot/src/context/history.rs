//! Conversation history
//!
//! Each user gets a fixed-capacity ring of turns. Once full, every new turn
//! overwrites the oldest slot. History is volatile and lives as long as the
//! process.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_MAX_TURNS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    fn label(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Assistant => "Assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug)]
struct TurnRing {
    slots: Vec<ConversationTurn>,
    /// Index of the oldest turn once the ring is full
    head: usize,
    capacity: usize,
}

impl TurnRing {
    fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            head: 0,
            capacity,
        }
    }

    fn push(&mut self, turn: ConversationTurn) {
        if self.slots.len() < self.capacity {
            self.slots.push(turn);
        } else {
            self.slots[self.head] = turn;
            self.head = (self.head + 1) % self.capacity;
        }
    }

    /// Oldest first
    fn iter(&self) -> impl Iterator<Item = &ConversationTurn> {
        let (newer, older) = self.slots.split_at(self.head);
        older.iter().chain(newer.iter())
    }

    fn len(&self) -> usize {
        self.slots.len()
    }
}

/// Per-user turn log keyed by user id
#[derive(Debug)]
pub struct ConversationHistory {
    users: DashMap<String, TurnRing>,
    max_turns: usize,
}

impl Default for ConversationHistory {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TURNS)
    }
}

impl ConversationHistory {
    /// `max_turns` of zero is treated as one
    pub fn new(max_turns: usize) -> Self {
        Self {
            users: DashMap::new(),
            max_turns: max_turns.max(1),
        }
    }

    pub fn max_turns(&self) -> usize {
        self.max_turns
    }

    pub fn add_turn(&self, user_id: &str, role: Role, text: impl Into<String>) {
        let turn = ConversationTurn {
            role,
            text: text.into(),
            timestamp: Utc::now(),
        };
        let mut ring = self
            .users
            .entry(user_id.to_string())
            .or_insert_with(|| TurnRing::new(self.max_turns));
        ring.push(turn);
        debug!(user = %user_id, role = ?role, turns = ring.len(), "Recorded conversation turn");
    }

    /// Last `2 * limit` turns as `User: …` / `Assistant: …` lines
    pub fn recent_context(&self, user_id: &str, limit: usize) -> String {
        let turns = self.turns(user_id);
        let skip = turns.len().saturating_sub(limit.saturating_mul(2));
        turns
            .iter()
            .skip(skip)
            .map(|turn| format!("{}: {}", turn.role.label(), turn.text))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// All stored turns, oldest first
    pub fn turns(&self, user_id: &str) -> Vec<ConversationTurn> {
        self.users
            .get(user_id)
            .map(|ring| ring.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Forget a user; returns whether anything was stored
    pub fn clear_user(&self, user_id: &str) -> bool {
        self.users.remove(user_id).is_some()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(history: &ConversationHistory, user: &str) -> Vec<String> {
        history.turns(user).into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_turns_in_order() {
        let history = ConversationHistory::new(10);
        history.add_turn("u1", Role::User, "hi");
        history.add_turn("u1", Role::Assistant, "hello");
        assert_eq!(texts(&history, "u1"), vec!["hi", "hello"]);
        assert_eq!(history.turns("u1")[1].role, Role::Assistant);
    }

    #[test]
    fn test_oldest_evicted() {
        let history = ConversationHistory::new(3);
        for i in 0..7 {
            history.add_turn("u", Role::User, format!("m{}", i));
        }
        assert_eq!(texts(&history, "u"), vec!["m4", "m5", "m6"]);
    }

    #[test]
    fn test_users_isolated() {
        let history = ConversationHistory::default();
        history.add_turn("a", Role::User, "from a");
        history.add_turn("b", Role::User, "from b");
        assert_eq!(texts(&history, "a"), vec!["from a"]);
        assert_eq!(history.user_count(), 2);
    }

    #[test]
    fn test_recent_context() {
        let history = ConversationHistory::new(10);
        for i in 0..3 {
            history.add_turn("u", Role::User, format!("q{}", i));
            history.add_turn("u", Role::Assistant, format!("a{}", i));
        }
        assert_eq!(history.recent_context("u", 1), "User: q2\nAssistant: a2");
        assert_eq!(history.recent_context("nobody", 5), "");
    }

    #[test]
    fn test_recent_context_huge_limit_returns_everything() {
        let history = ConversationHistory::new(10);
        history.add_turn("u", Role::User, "q0");
        history.add_turn("u", Role::Assistant, "a0");
        assert_eq!(
            history.recent_context("u", usize::MAX),
            "User: q0\nAssistant: a0"
        );
    }

    #[test]
    fn test_clear_user() {
        let history = ConversationHistory::default();
        history.add_turn("u", Role::User, "x");
        assert!(history.clear_user("u"));
        assert!(!history.clear_user("u"));
        assert!(history.turns("u").is_empty());
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let history = ConversationHistory::new(0);
        history.add_turn("u", Role::User, "a");
        history.add_turn("u", Role::User, "b");
        assert_eq!(texts(&history, "u"), vec!["b"]);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Role::Assistant).unwrap(), "assistant");
    }
}
