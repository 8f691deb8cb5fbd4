//! Response renderer — turns a tool result, or its absence, into reply text.
//!
//! Rendering is deterministic: the same utterance, result and tool name
//! always produce the same string. There is no randomness and no state
//! beyond the capability list captured at construction.

use regex_lite::Regex;
use std::sync::LazyLock;
use toolroute_core::tool::{Calculation, Conversion, SearchOutcome, ToolDescriptor, ToolResult, WeatherReport};

pub const GREETING: &str = "Hello! I'm an agentic AI assistant. I can help you with calculations, \
    weather information, web searches, and currency conversions. What would you like to know?";

pub const STATUS: &str = "I'm functioning perfectly! Ready to assist you with various tasks. \
    What can I help you with today?";

pub const FALLBACK: &str = "I understand your message. I can help with calculations, weather \
    queries, web searches, and currency conversions. Could you please provide more specific \
    details about what you'd like me to do?";

pub const TOOL_ACKNOWLEDGED: &str = "I executed the tool successfully.";

const EXAMPLE_PROMPTS: [&str; 3] = [
    "What's the weather in Paris?",
    "Calculate 15 * 23 + 45",
    "Convert 100 USD to EUR",
];

static GREETING_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(hello|hi|hey|greetings)\b").expect("greeting pattern")
});

static STATUS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"how are you|what's up").expect("status pattern"));

static CAPABILITIES_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"what can you do|capabilities|help").expect("capabilities pattern")
});

/// Renders assistant replies from per-tool and conversational templates.
#[derive(Debug, Clone)]
pub struct ResponseRenderer {
    capabilities: String,
}

impl ResponseRenderer {
    /// Build a renderer whose capabilities reply lists `tools`.
    pub fn new(tools: &[ToolDescriptor]) -> Self {
        let mut capabilities = String::from("I'm an agentic AI with the following capabilities:\n");
        for tool in tools {
            capabilities.push_str(&format!("\n- {}: {}", tool.name, tool.description));
        }
        capabilities.push_str("\n\nTry asking me something like:");
        for prompt in EXAMPLE_PROMPTS {
            capabilities.push_str(&format!("\n- \"{prompt}\""));
        }
        Self { capabilities }
    }

    /// Render the reply for one turn.
    ///
    /// A result is only used when both `tool_result` and `tool_name` are present;
    /// otherwise the utterance is answered conversationally.
    pub fn render(&self, utterance: &str, tool_result: Option<&ToolResult>, tool_name: Option<&str>) -> String {
        match (tool_result, tool_name) {
            (Some(result), Some(name)) => render_tool(name, result),
            _ => self.render_conversational(utterance),
        }
    }

    fn render_conversational(&self, utterance: &str) -> String {
        let message = utterance.to_lowercase();

        if GREETING_PATTERN.is_match(&message) {
            return GREETING.to_string();
        }
        if STATUS_PATTERN.is_match(&message) {
            return STATUS.to_string();
        }
        if CAPABILITIES_PATTERN.is_match(&message) {
            return self.capabilities.clone();
        }
        FALLBACK.to_string()
    }
}

fn render_tool(name: &str, result: &ToolResult) -> String {
    match (name, result) {
        (_, ToolResult::Failure { error }) => {
            format!("I tried to use {name}, but it failed: {error}")
        }
        ("calculator", ToolResult::Calculation(Calculation { expression, result })) => {
            format!("I calculated the result: {expression} = {}", format_number(*result))
        }
        ("get_weather", ToolResult::Weather(WeatherReport { location, condition, temperature, humidity, .. })) => {
            format!(
                "The weather in {location} is currently {condition} with a temperature of \
                 {temperature} and humidity at {humidity}."
            )
        }
        ("currency_converter", ToolResult::Conversion(Conversion { amount, from, to, result, .. })) => {
            format!("Converting {} {from} to {to}: {result:.2} {to}", format_number(*amount))
        }
        ("web_search", ToolResult::Search(SearchOutcome { results, query })) => match results.first() {
            Some(hit) => format!("I found information about \"{query}\":\n\n{}", hit.snippet),
            None => format!("I couldn't find any information about \"{query}\"."),
        },
        _ => TOOL_ACKNOWLEDGED.to_string(),
    }
}

/// Format a number without a trailing `.0` when it is integral.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
