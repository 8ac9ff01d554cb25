//! Core types for the TalentScout conversation engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::stage::Stage;

/// Unique identifier for an interview session
pub type SessionId = String;

/// Message role in a conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    Assistant,
    User,
}

/// A single chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique message ID (UUID)
    pub id: String,
    /// Role of the message sender
    pub role: MessageRole,
    /// Message content
    pub content: String,
    /// When the message was created
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a new user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role: MessageRole::User,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    /// Create a new assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role: MessageRole::Assistant,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

/// One collected candidate field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CandidateField {
    /// Display key, e.g. "Full Name"
    pub key: String,
    /// Raw value as the candidate typed it (no normalization)
    pub value: String,
}

/// Candidate information collected during intake.
///
/// Fields are kept in collection order and accumulate monotonically:
/// a field is never removed once set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateProfile {
    entries: Vec<CandidateField>,
}

impl CandidateProfile {
    /// Create an empty profile
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a field value verbatim. Re-setting an existing key replaces
    /// its value in place, keeping the original collection position.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|e| e.key == key) {
            entry.value = value;
        } else {
            self.entries.push(CandidateField { key, value });
        }
    }

    /// Look up a field by key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.value.as_str())
    }

    /// Iterate fields in collection order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|e| (e.key.as_str(), e.value.as_str()))
    }

    /// Number of collected fields
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no fields have been collected yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Full state of one candidate interaction.
///
/// Created at the first turn and mutated exclusively by the conversation
/// engine. Once `ended` is true the session stops being read; the chat
/// surface may discard it or start a new one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewSession {
    /// Unique session ID
    pub id: SessionId,
    /// Current intake stage
    pub stage: Stage,
    /// Collected candidate fields
    pub candidate: CandidateProfile,
    /// Generated interview questions, one per line of the model output
    #[serde(rename = "pendingQuestions", default)]
    pub pending_questions: Vec<String>,
    /// Terminal flag set by the universal exit keywords
    pub ended: bool,
    /// When the session was created
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    /// When the session was last updated
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl InterviewSession {
    /// Create a new session at the greeting stage
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            stage: Stage::Greeting,
            candidate: CandidateProfile::new(),
            pending_questions: Vec::new(),
            ended: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if this session still accepts turns
    pub fn is_active(&self) -> bool {
        !self.ended
    }
}

impl Default for InterviewSession {
    fn default() -> Self {
        Self::new()
    }
}
