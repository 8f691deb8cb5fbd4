//! Intent — the classifier's per-turn routing decision.

use serde::{Deserialize, Serialize};

/// Whether a tool should run this turn, which one, and with what arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    pub needs_tool: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
}

impl Intent {
    /// No tool applies; the renderer answers conversationally.
    pub fn none() -> Self {
        Self {
            needs_tool: false,
            tool_name: None,
            parameters: None,
        }
    }

    /// Route to `tool_name` with the extracted `parameters`.
    pub fn tool(tool_name: impl Into<String>, parameters: serde_json::Value) -> Self {
        Self {
            needs_tool: true,
            tool_name: Some(tool_name.into()),
            parameters: Some(parameters),
        }
    }

    /// The selected tool and its parameters, if any.
    pub fn invocation(&self) -> Option<(&str, &serde_json::Value)> {
        match (self.needs_tool, &self.tool_name, &self.parameters) {
            (true, Some(name), Some(params)) => Some((name.as_str(), params)),
            _ => None,
        }
    }
}
