//! Tool trait — the abstraction over agent capabilities.
//!
//! A tool is a named executor with a human-readable parameter schema.
//! The built-in tools are mocked; a real backend (search engine, weather API,
//! FX-rate feed) is just another implementation of the same trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::error::ToolError;

/// Static description of a tool, used for introspection only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    /// Unique tool name
    pub name: String,

    /// What the tool does
    pub description: String,

    /// Parameter name → human-readable type and meaning. Not enforced at runtime.
    pub parameter_schema: BTreeMap<String, String>,
}

/// One synthetic search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub snippet: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub results: Vec<SearchHit>,
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calculation {
    pub expression: String,
    pub result: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location: String,
    pub condition: String,
    /// Formatted as `"<n>°C"`
    pub temperature: String,
    /// Formatted as `"<n>%"`
    pub humidity: String,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    pub amount: f64,
    pub from: String,
    pub to: String,
    /// Rounded to two decimal places
    pub result: f64,
    pub note: String,
}

/// The structured outcome of a tool execution.
///
/// Serializes to the tool-specific mapping, or to `{"error": ...}` on failure.
/// Variant order matters for untagged deserialization: the error shape is
/// tried first, then the variants with the most distinctive keys. Anything
/// else a client echoes back in its history lands in `Other` unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolResult {
    Failure { error: String },
    Search(SearchOutcome),
    Conversion(Conversion),
    Weather(WeatherReport),
    Calculation(Calculation),
    Other(serde_json::Value),
}

impl ToolResult {
    /// Build an error payload.
    pub fn failure(error: impl Into<String>) -> Self {
        ToolResult::Failure {
            error: error.into(),
        }
    }

    /// The error message, if this result is a failure.
    pub fn error(&self) -> Option<&str> {
        match self {
            ToolResult::Failure { error } => Some(error),
            _ => None,
        }
    }
}

/// The core Tool trait.
///
/// Each tool (web_search, calculator, get_weather, currency_converter)
/// implements this trait and is registered in the [`ToolRegistry`].
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this tool (e.g., "calculator").
    fn name(&self) -> &str;

    /// A description of what this tool does.
    fn description(&self) -> &str;

    /// Parameter name → human-readable type and meaning.
    fn parameter_schema(&self) -> BTreeMap<String, String>;

    /// Execute the tool with the given arguments.
    ///
    /// Domain failures (a malformed expression, say) are returned as
    /// `Ok(ToolResult::Failure { .. })`. `Err` is reserved for arguments
    /// that are missing or of the wrong type.
    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError>;

    /// Convert this tool into its descriptor.
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameter_schema: self.parameter_schema(),
        }
    }
}

/// Convenience for building a parameter schema from string pairs.
pub fn schema(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

/// A registry of available tools.
///
/// Lists descriptors in registration order and looks up executors by name.
/// The intent classifier routes independently of this catalogue, so a
/// registered tool is only reachable once a classifier rule names it.
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
    order: Vec<String>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Register a tool. Replaces any existing tool with the same name.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let name = tool.name().to_string();
        if !self.tools.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.tools.insert(name, tool);
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    /// All tool descriptors, in registration order.
    pub fn list_tools(&self) -> Vec<ToolDescriptor> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|t| t.descriptor())
            .collect()
    }

    /// Execute a tool by name.
    pub async fn execute(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<ToolResult, ToolError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;
        tool.execute(arguments).await
    }

    /// List all registered tool names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.order.iter().map(|s| s.as_str()).collect()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
