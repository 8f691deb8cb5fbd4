//! Error types for the ToolRoute domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error enum.

use thiserror::Error;

use crate::message::Role;

// --- Bounded context errors ---

/// Input validation failures, raised before any classification runs.
#[derive(Debug, Error)]
pub enum TurnError {
    #[error("Invalid messages format: {0}")]
    MalformedTranscript(String),

    #[error("Invalid messages format: transcript is empty")]
    EmptyTranscript,

    #[error("Last message must be from user (got {0})")]
    LastMessageNotFromUser(Role),
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_error_displays_role() {
        let err = TurnError::LastMessageNotFromUser(Role::Assistant);
        assert_eq!(err.to_string(), "Last message must be from user (got assistant)");
    }

    #[test]
    fn malformed_transcript_keeps_parser_detail() {
        let err = TurnError::MalformedTranscript("missing field `messages`".into());
        assert!(err.to_string().starts_with("Invalid messages format"));
        assert!(err.to_string().contains("messages"));
    }

    #[test]
    fn tool_error_displays_correctly() {
        let err = ToolError::InvalidArguments("Missing 'query' argument".into());
        assert!(err.to_string().contains("query"));
    }
}
