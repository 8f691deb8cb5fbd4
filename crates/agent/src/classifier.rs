//! Intent classifier — routes an utterance to at most one tool.
//!
//! Classification is an ordered cascade of rules. Each rule has two stages:
//! a vocabulary check and a parameter extractor. A rule fires only when both
//! succeed; if the vocabulary matches but extraction comes back empty, the
//! cascade moves on to the next rule. The first rule to fire wins.
//!
//! The cascade is independent of the [`ToolRegistry`](toolroute_core::ToolRegistry):
//! registering a tool does not make it routable until a rule here names it.

use regex_lite::Regex;
use serde_json::json;
use std::sync::LazyLock;
use toolroute_core::intent::Intent;
use toolroute_tools::calculator::is_arithmetic_char;
use tracing::debug;

static CALCULATION_VOCABULARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"calculate|compute|what is|solve|[+\-*/]|\d+\s*[+\-*/]")
        .expect("calculation vocabulary pattern")
});

static WEATHER_VOCABULARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"weather|temperature|forecast|climate").expect("weather vocabulary pattern")
});

/// Tried in order; the first pattern that captures a non-blank location wins.
static LOCATION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\bin\s+([a-z\s]+)",
        r"\bfor\s+([a-z\s]+)",
        r"\bat\s+([a-z\s]+)",
        r"weather\s+([a-z\s]+)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("location pattern"))
    .collect()
});

static CURRENCY_VOCABULARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"convert|currency|exchange|usd|eur|gbp|jpy").expect("currency vocabulary pattern")
});

static AMOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\.?\d*)").expect("amount pattern"));

/// `from XXX to YYY` first, then bare `XXX to YYY`.
static CURRENCY_PAIRS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\bfrom\s+([a-z]{3})\s+to\s+([a-z]{3})\b",
        r"\b([a-z]{3})\s+to\s+([a-z]{3})\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("currency pair pattern"))
    .collect()
});

static SEARCH_VOCABULARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"search|find|look up|who is|what is|when did|where is|how to")
        .expect("search vocabulary pattern")
});

/// An utterance prepared for matching.
struct Utterance<'a> {
    raw: &'a str,
    lowered: String,
}

type Extractor = fn(&IntentClassifier, &Utterance<'_>) -> Option<serde_json::Value>;

/// One stage of the cascade.
struct Rule {
    tool: &'static str,
    vocabulary: &'static LazyLock<Regex>,
    extract: Extractor,
}

static RULES: [Rule; 4] = [
    Rule {
        tool: "calculator",
        vocabulary: &CALCULATION_VOCABULARY,
        extract: IntentClassifier::extract_expression,
    },
    Rule {
        tool: "get_weather",
        vocabulary: &WEATHER_VOCABULARY,
        extract: IntentClassifier::extract_location,
    },
    Rule {
        tool: "currency_converter",
        vocabulary: &CURRENCY_VOCABULARY,
        extract: IntentClassifier::extract_conversion,
    },
    Rule {
        tool: "web_search",
        vocabulary: &SEARCH_VOCABULARY,
        extract: IntentClassifier::extract_query,
    },
];

/// Pattern-based intent classifier.
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    default_location: String,
}

impl IntentClassifier {
    pub fn new(default_location: impl Into<String>) -> Self {
        Self {
            default_location: default_location.into(),
        }
    }

    /// Decide whether a tool applies to `utterance`, and with what parameters.
    pub fn classify(&self, utterance: &str) -> Intent {
        let utterance = Utterance {
            raw: utterance,
            lowered: utterance.to_lowercase(),
        };

        for rule in &RULES {
            if !rule.vocabulary.is_match(&utterance.lowered) {
                continue;
            }
            match (rule.extract)(self, &utterance) {
                Some(parameters) => {
                    debug!(tool = rule.tool, %parameters, "Intent matched");
                    return Intent::tool(rule.tool, parameters);
                }
                None => debug!(tool = rule.tool, "Vocabulary matched but extraction failed, falling through"),
            }
        }

        debug!("No tool intent detected");
        Intent::none()
    }

    /// Tool names the cascade can route to, in evaluation order.
    pub fn routable_tools() -> Vec<&'static str> {
        RULES.iter().map(|r| r.tool).collect()
    }

    fn extract_expression(&self, utterance: &Utterance<'_>) -> Option<serde_json::Value> {
        longest_arithmetic_run(utterance.raw).map(|expression| json!({ "expression": expression }))
    }

    fn extract_location(&self, utterance: &Utterance<'_>) -> Option<serde_json::Value> {
        let location = LOCATION_PATTERNS
            .iter()
            .filter_map(|re| re.captures(&utterance.lowered))
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
            .find(|loc| !loc.is_empty())
            .unwrap_or(self.default_location.as_str());
        Some(json!({ "location": location }))
    }

    fn extract_conversion(&self, utterance: &Utterance<'_>) -> Option<serde_json::Value> {
        let amount: f64 = AMOUNT
            .captures(&utterance.lowered)?
            .get(1)?
            .as_str()
            .parse()
            .ok()
            .filter(|amount: &f64| amount.is_finite())?;

        let (from, to) = CURRENCY_PAIRS.iter().find_map(|re| {
            let caps = re.captures(&utterance.lowered)?;
            Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
        })?;

        Some(json!({
            "amount": amount,
            "from": from.to_uppercase(),
            "to": to.to_uppercase(),
        }))
    }

    fn extract_query(&self, utterance: &Utterance<'_>) -> Option<serde_json::Value> {
        Some(json!({ "query": utterance.raw }))
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new("New York")
    }
}

/// The longest trimmed run of arithmetic characters that contains a digit.
/// Ties go to the earliest run.
fn longest_arithmetic_run(text: &str) -> Option<&str> {
    text.split(|c: char| !is_arithmetic_char(c))
        .map(str::trim)
        .filter(|run| run.bytes().any(|b| b.is_ascii_digit()))
        .fold(None, |best: Option<&str>, run| match best {
            Some(b) if b.len() >= run.len() => Some(b),
            _ => Some(run),
        })
}
