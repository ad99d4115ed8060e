//! Per-mount session state.
//!
//! A `SessionState` is created fresh each time the chat surface mounts and
//! torn down with it. The transcript lives only in memory; a new mount
//! means a new session id and an empty history, by design. Only the user's
//! credentials outlive the session (see `barista-infrastructure`).

use chrono::Utc;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use uuid::Uuid;

use crate::message::Message;

/// Seeded as the first agent turn of every fresh session.
pub const WELCOME_TEXT: &str = "Welcome to our advanced cafe! ☕ Choose your experience:\n\
• Modern: Basic LangChain v1 features\n\
• Advanced: Full middleware & structured output\n\
• Workflow: Custom StateGraph routing\n\
• DeepAgents: Advanced planning with subagents\n\n\
How can I help you today?";

/// Selects which backend conversational strategy handles a message.
///
/// Opaque to the client beyond its label; the set offered to the user is a
/// configuration-time choice (see `WidgetConfig::deep_agents_enabled`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AgentMode {
    Modern,
    Advanced,
    Workflow,
    DeepAgents,
}

/// Advisory user context forwarded to the backend with every message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UserTier {
    Basic,
    Premium,
}

/// All mutable state owned by one mounted chat surface.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Random opaque token, generated once per mount, never reused.
    pub session_id: String,
    pub agent_mode: AgentMode,
    pub model_provider: Option<String>,
    pub model_name: Option<String>,
    pub user_tier: UserTier,
    /// Append-only ordered transcript.
    transcript: Vec<Message>,
    /// True between send and response/failure; acts as the single-flight
    /// guard for chat requests.
    pub pending_request: bool,
    /// True while a voice capture is open.
    pub voice_capture_active: bool,
    /// Visibility of the insights panel. The report itself is derived
    /// lazily from the transcript, never snapshotted here.
    pub insights_open: bool,
    last_message_id: u64,
}

impl SessionState {
    /// Creates a fresh session seeded with the welcome message.
    pub fn new() -> Self {
        let mut state = Self {
            session_id: Uuid::new_v4().to_string(),
            agent_mode: AgentMode::Modern,
            model_provider: None,
            model_name: None,
            user_tier: UserTier::Basic,
            transcript: Vec::new(),
            pending_request: false,
            voice_capture_active: false,
            insights_open: false,
            last_message_id: 0,
        };

        let id = state.allocate_message_id();
        state.transcript.push(Message::agent(id, WELCOME_TEXT));
        state
    }

    /// Allocates the next message id: creation-time millis, bumped past the
    /// previous id when two messages land in the same millisecond.
    pub fn allocate_message_id(&mut self) -> u64 {
        let now = Utc::now().timestamp_millis().max(0) as u64;
        let id = if now > self.last_message_id {
            now
        } else {
            self.last_message_id + 1
        };
        self.last_message_id = id;
        id
    }

    /// Appends a message to the transcript. Messages are immutable once
    /// appended and the transcript only ever grows.
    pub fn append(&mut self, message: Message) {
        self.transcript.push(message);
    }

    /// The ordered transcript, oldest first.
    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    /// Most recent agent message carrying a non-empty structured payload,
    /// scanning backward from the end of the transcript.
    pub fn latest_structured_output(&self) -> Option<&serde_json::Value> {
        self.transcript
            .iter()
            .rev()
            .find(|m| m.has_structured_output())
            .and_then(|m| m.structured_output.as_ref())
    }

    /// Number of turns in the transcript (welcome message included).
    pub fn len(&self) -> usize {
        self.transcript.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transcript.is_empty()
    }

    /// The last turn, if any.
    pub fn last_message(&self) -> Option<&Message> {
        self.transcript.last()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Author;

    #[test]
    fn test_new_session_is_seeded_with_welcome() {
        let state = SessionState::new();
        assert_eq!(state.len(), 1);
        let first = state.last_message().unwrap();
        assert_eq!(first.author, Author::Agent);
        assert_eq!(first.text, WELCOME_TEXT);
        assert!(!state.pending_request);
        assert!(!state.voice_capture_active);
    }

    #[test]
    fn test_session_ids_are_unique_across_mounts() {
        let a = SessionState::new();
        let b = SessionState::new();
        assert_ne!(a.session_id, b.session_id);
    }

    #[test]
    fn test_message_ids_are_strictly_increasing() {
        let mut state = SessionState::new();
        let mut previous = 0;
        // Same-millisecond allocations must still be strictly ordered.
        for _ in 0..100 {
            let id = state.allocate_message_id();
            assert!(id > previous);
            previous = id;
        }
    }

    #[test]
    fn test_agent_mode_labels() {
        assert_eq!(AgentMode::Modern.to_string(), "modern");
        assert_eq!(AgentMode::DeepAgents.to_string(), "deepagents");
        assert_eq!(UserTier::Premium.to_string(), "premium");
    }

    #[test]
    fn test_latest_structured_output_scans_backward() {
        let mut state = SessionState::new();

        let id = state.allocate_message_id();
        let mut older = Message::agent(id, "older");
        older.structured_output = Some(serde_json::json!({"agent_type": "advanced"}));
        state.append(older);

        let id = state.allocate_message_id();
        state.append(Message::user(id, "and a muffin"));

        let id = state.allocate_message_id();
        let mut newer = Message::agent(id, "newer");
        newer.structured_output = Some(serde_json::json!({"agent_type": "workflow"}));
        state.append(newer);

        let latest = state.latest_structured_output().unwrap();
        assert_eq!(latest["agent_type"], "workflow");
    }

    #[test]
    fn test_latest_structured_output_none_when_absent() {
        let state = SessionState::new();
        assert!(state.latest_structured_output().is_none());
    }
}
