//! Conversation transcript model.
//!
//! One `Message` is one turn in the conversation. Agent turns may carry
//! typed content blocks, an opaque structured-output payload, and the
//! intent/confidence pair produced by the workflow agent.

use chrono::{DateTime, Utc};
use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Author {
    User,
    Agent,
}

/// One typed segment of an agent response.
///
/// The wire format is a JSON object with a `type` tag (`"reasoning"`,
/// `"tool_call"`, `"text"`). Unknown tags fall back to a `Text` block
/// wrapping whatever text field is available, so a newer backend never
/// breaks rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    Reasoning { explanation: String },
    ToolCall { payload: serde_json::Value },
    Text { text: String },
}

impl ContentBlock {
    /// Returns the displayable text of this block, if any.
    pub fn display_text(&self) -> Option<&str> {
        match self {
            ContentBlock::Reasoning { explanation } => Some(explanation),
            ContentBlock::Text { text } => Some(text),
            ContentBlock::ToolCall { .. } => None,
        }
    }
}

impl Serialize for ContentBlock {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;

        match self {
            ContentBlock::Reasoning { explanation } => {
                map.serialize_entry("type", "reasoning")?;
                map.serialize_entry("reasoning", explanation)?;
            }
            ContentBlock::ToolCall { payload } => {
                map.serialize_entry("type", "tool_call")?;
                map.serialize_entry("tool_call", payload)?;
            }
            ContentBlock::Text { text } => {
                map.serialize_entry("type", "text")?;
                map.serialize_entry("text", text)?;
            }
        }

        map.end()
    }
}

/// Loose wire shape used to tolerate partial or unknown blocks.
#[derive(Deserialize)]
struct RawBlock {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    reasoning: Option<String>,
    #[serde(default)]
    tool_call: Option<serde_json::Value>,
}

impl<'de> Deserialize<'de> for ContentBlock {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawBlock::deserialize(deserializer)?;

        let block = match raw.kind.as_deref() {
            Some("reasoning") => ContentBlock::Reasoning {
                explanation: raw.reasoning.or(raw.text).unwrap_or_default(),
            },
            Some("tool_call") => ContentBlock::ToolCall {
                payload: raw.tool_call.unwrap_or(serde_json::Value::Null),
            },
            // "text" and anything unrecognized render as text
            _ => ContentBlock::Text {
                text: raw.text.or(raw.reasoning).unwrap_or_default(),
            },
        };

        Ok(block)
    }
}

/// One turn in the conversation.
///
/// Messages are immutable once appended; the transcript is an append-only
/// ordered sequence. `id` is creation-time-derived and strictly increasing
/// within a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    pub text: String,
    pub author: Author,
    pub timestamp: DateTime<Utc>,
    /// Agent turns only; always empty for user turns.
    #[serde(default)]
    pub content_blocks: Vec<ContentBlock>,
    /// Opaque backend payload backing the insights view.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured_output: Option<serde_json::Value>,
    /// Workflow-mode request classification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
    /// Paired with `intent`, in [0, 1].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl Message {
    /// Creates a user turn. User turns never carry blocks or structured data.
    pub fn user(id: u64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            author: Author::User,
            timestamp: Utc::now(),
            content_blocks: Vec::new(),
            structured_output: None,
            intent: None,
            confidence: None,
        }
    }

    /// Creates a plain agent turn with no blocks or structured data.
    pub fn agent(id: u64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            author: Author::Agent,
            timestamp: Utc::now(),
            content_blocks: Vec::new(),
            structured_output: None,
            intent: None,
            confidence: None,
        }
    }

    /// True when this is an agent turn carrying a non-empty structured payload.
    pub fn has_structured_output(&self) -> bool {
        self.author == Author::Agent
            && self
                .structured_output
                .as_ref()
                .is_some_and(|v| !v.is_null())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_reasoning_block() {
        let json = r#"{"type": "reasoning", "reasoning": "I should check the menu"}"#;
        let block: ContentBlock = serde_json::from_str(json).unwrap();
        assert_eq!(
            block,
            ContentBlock::Reasoning {
                explanation: "I should check the menu".to_string()
            }
        );
    }

    #[test]
    fn test_deserialize_tool_call_block() {
        let json = r#"{"type": "tool_call", "tool_call": {"name": "get_menu"}}"#;
        let block: ContentBlock = serde_json::from_str(json).unwrap();
        match block {
            ContentBlock::ToolCall { payload } => {
                assert_eq!(payload["name"], "get_menu");
            }
            other => panic!("Expected ToolCall, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_tag_falls_back_to_text() {
        let json = r#"{"type": "citation", "text": "see the menu"}"#;
        let block: ContentBlock = serde_json::from_str(json).unwrap();
        assert_eq!(
            block,
            ContentBlock::Text {
                text: "see the menu".to_string()
            }
        );
    }

    #[test]
    fn test_missing_tag_falls_back_to_text() {
        let json = r#"{"reasoning": "leftover field"}"#;
        let block: ContentBlock = serde_json::from_str(json).unwrap();
        assert_eq!(
            block,
            ContentBlock::Text {
                text: "leftover field".to_string()
            }
        );
    }

    #[test]
    fn test_serialize_round_trip_text() {
        let block = ContentBlock::Text {
            text: "hello".to_string(),
        };
        let json = serde_json::to_string(&block).unwrap();
        let back: ContentBlock = serde_json::from_str(&json).unwrap();
        assert_eq!(block, back);
    }

    #[test]
    fn test_user_message_has_no_blocks() {
        let msg = Message::user(1, "one latte please");
        assert_eq!(msg.author, Author::User);
        assert!(msg.content_blocks.is_empty());
        assert!(msg.structured_output.is_none());
    }

    #[test]
    fn test_has_structured_output_ignores_null() {
        let mut msg = Message::agent(2, "done");
        assert!(!msg.has_structured_output());

        msg.structured_output = Some(serde_json::Value::Null);
        assert!(!msg.has_structured_output());

        msg.structured_output = Some(serde_json::json!({"agent_type": "advanced"}));
        assert!(msg.has_structured_output());
    }
}
