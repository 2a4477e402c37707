//! Turn and Transcript definitions
//!
//! The Transcript is the single flat, append-only log of a session. It is
//! both the model's conversational context (every turn, including internal
//! protocol turns) and the raw source the user-visible view is derived from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// Visibility classification, attached at creation time.
///
/// The kind is a property of how the turn was produced, never inferred from
/// its text at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnKind {
    /// Carries content the user should see on replay.
    UserVisible,
    /// The assistant's intent-classification reply.
    InternalClassification,
    /// The synthesized summary instruction, recorded with the user role
    /// even though no human typed it.
    InternalSummaryRequest,
}

/// One entry of the conversation log. Immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub kind: TurnKind,
    /// Exact text sent to or received from the model.
    pub raw_text: String,
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    fn new(role: Role, kind: TurnKind, raw_text: impl Into<String>) -> Self {
        Self {
            role,
            kind,
            raw_text: raw_text.into(),
            timestamp: Utc::now(),
        }
    }

    /// The templated intent instruction wrapping a human utterance.
    pub fn user_utterance(raw_text: impl Into<String>) -> Self {
        Self::new(Role::User, TurnKind::UserVisible, raw_text)
    }

    /// The assistant's raw intent-classification reply.
    pub fn classification_reply(raw_text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, TurnKind::InternalClassification, raw_text)
    }

    /// The synthesized summary instruction sent on the user's behalf.
    pub fn summary_request(raw_text: impl Into<String>) -> Self {
        Self::new(Role::User, TurnKind::InternalSummaryRequest, raw_text)
    }

    /// The assistant's raw judgment-list reply.
    pub fn judgment_reply(raw_text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, TurnKind::UserVisible, raw_text)
    }
}

/// Append-only ordered turn log, created once per session and never pruned.
///
/// Insertion order is semantically meaningful: it is replayed verbatim as
/// the model's context and projected in order for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn. There is no removal or mutation counterpart.
    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
