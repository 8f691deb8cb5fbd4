//! Message and transcript domain types.
//!
//! A transcript is an ordered list of messages supplied by the caller.
//! The turn orchestrator reads the last one and returns new messages to append;
//! earlier entries are never rewritten.

use serde::{Deserialize, Serialize};

use crate::tool::ToolResult;

/// The role of a message sender in a transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user
    User,
    /// The assistant reply
    Assistant,
    /// Tool execution event
    Tool,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Tool => "tool",
        };
        f.write_str(s)
    }
}

/// A single message in a transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Who sent this message
    pub role: Role,

    /// The text content
    pub content: String,

    /// Name of the tool invoked (tool messages only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call: Option<String>,

    /// Structured result of the tool call (tool messages only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_result: Option<ToolResult>,
}

impl Message {
    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            tool_call: None,
            tool_result: None,
        }
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            tool_call: None,
            tool_result: None,
        }
    }

    /// Create a tool event message. Always carries both the call name and its result.
    pub fn tool(tool_call: impl Into<String>, result: ToolResult) -> Self {
        Self {
            role: Role::Tool,
            content: "Tool executed".into(),
            tool_call: Some(tool_call.into()),
            tool_result: Some(result),
        }
    }
}

/// The body a caller submits for one turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<Message>,
}

/// The body returned for one turn: either the new messages or an error string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatResponse {
    Messages { messages: Vec<Message> },
    Error { error: String },
}
