//! Turn orchestrator — classify, optionally execute, render.
//!
//! One turn reads the last message of a transcript and produces either a
//! single assistant message, or a tool message followed by the assistant
//! message rendered from that tool's result. At most one tool runs per turn.

use std::sync::Arc;
use toolroute_config::AppConfig;
use toolroute_core::error::{ToolError, TurnError};
use toolroute_core::message::{ChatRequest, ChatResponse, Message, Role};
use toolroute_core::tool::{ToolRegistry, ToolResult};
use tracing::{debug, info, warn};

use crate::classifier::IntentClassifier;
use crate::renderer::ResponseRenderer;

/// Runs single turns against a fixed classifier, registry and renderer.
pub struct TurnRunner {
    classifier: IntentClassifier,
    tools: Arc<ToolRegistry>,
    renderer: ResponseRenderer,
}

impl TurnRunner {
    /// Create a runner. The renderer's capability reply is built from `tools`.
    pub fn new(classifier: IntentClassifier, tools: Arc<ToolRegistry>) -> Self {
        let renderer = ResponseRenderer::new(&tools.list_tools());
        Self {
            classifier,
            tools,
            renderer,
        }
    }

    /// Build a runner with the built-in tools configured from `config`.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            IntentClassifier::new(config.classifier.default_location.clone()),
            Arc::new(toolroute_tools::registry_from_config(config)),
        )
    }

    pub fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Process one turn and return the messages to append to `transcript`.
    ///
    /// The transcript is only read. Validation failures produce no messages.
    pub async fn run_turn(&self, transcript: &[Message]) -> Result<Vec<Message>, TurnError> {
        let last = transcript.last().ok_or(TurnError::EmptyTranscript)?;
        if last.role != Role::User {
            return Err(TurnError::LastMessageNotFromUser(last.role));
        }

        let utterance = last.content.as_str();
        let intent = self.classifier.classify(utterance);

        let Some((tool_name, parameters)) = intent.invocation() else {
            info!("Turn answered without a tool");
            return Ok(vec![Message::assistant(self.renderer.render(utterance, None, None))]);
        };

        info!(tool = tool_name, "Executing tool");
        let result = self.execute(tool_name, parameters.clone()).await;
        let reply = self.renderer.render(utterance, Some(&result), Some(tool_name));

        Ok(vec![Message::tool(tool_name, result), Message::assistant(reply)])
    }

    /// Parse a `{"messages": [...]}` request body and run the turn.
    pub async fn run_turn_json(&self, body: &str) -> Result<Vec<Message>, TurnError> {
        let request: ChatRequest = serde_json::from_str(body)
            .map_err(|e| TurnError::MalformedTranscript(e.to_string()))?;
        self.run_turn(&request.messages).await
    }

    /// Like [`run_turn_json`](Self::run_turn_json), folding validation errors into
    /// the `{"error": ...}` response shape.
    pub async fn respond(&self, body: &str) -> ChatResponse {
        match self.run_turn_json(body).await {
            Ok(messages) => ChatResponse::Messages { messages },
            Err(e) => {
                warn!(error = %e, "Turn rejected");
                ChatResponse::Error {
                    error: e.to_string(),
                }
            }
        }
    }

    /// Execute a tool, folding executor errors into an error payload.
    async fn execute(&self, tool_name: &str, parameters: serde_json::Value) -> ToolResult {
        match self.tools.execute(tool_name, parameters).await {
            Ok(result) => {
                if let Some(error) = result.error() {
                    debug!(tool = tool_name, error, "Tool reported an error");
                }
                result
            }
            Err(ToolError::NotFound(name)) => {
                warn!(tool = %name, "Classifier selected an unregistered tool");
                ToolResult::failure("Unknown tool")
            }
            Err(e) => {
                warn!(tool = tool_name, error = %e, "Tool execution failed");
                ToolResult::failure(e.to_string())
            }
        }
    }
}

impl Default for TurnRunner {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}
