//! Web search tool — stub that returns a synthetic search result.
//!
//! In production this would call a real search API (Brave, Google, etc.).
//! The stub returns one plausible hit so the dispatch pipeline can be
//! exercised end-to-end without network access.

use async_trait::async_trait;
use std::collections::BTreeMap;
use toolroute_core::error::ToolError;
use toolroute_core::tool::{schema, SearchHit, SearchOutcome, Tool, ToolResult};

pub struct WebSearchTool {
    result_url: String,
}

impl WebSearchTool {
    pub fn new(result_url: impl Into<String>) -> Self {
        Self {
            result_url: result_url.into(),
        }
    }
}

impl Default for WebSearchTool {
    fn default() -> Self {
        Self::new("https://example.com")
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "Search the web for current information, news, or facts"
    }

    fn parameter_schema(&self) -> BTreeMap<String, String> {
        schema(&[("query", "string - the search query")])
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let query = arguments["query"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'query' argument".into()))?;

        Ok(ToolResult::Search(SearchOutcome {
            results: vec![self.mock_hit(query)],
            query: query.to_string(),
        }))
    }
}

impl WebSearchTool {
    fn mock_hit(&self, query: &str) -> SearchHit {
        SearchHit {
            title: format!("Information about \"{query}\""),
            snippet: format!(
                "This is a simulated search result for \"{query}\". In production, this would \
                 connect to a real search API like Google, Bing, or Brave Search."
            ),
            url: self.result_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn search_returns_single_hit() {
        let result = WebSearchTool::default()
            .execute(serde_json::json!({"query": "Who is Ada Lovelace?"}))
            .await
            .unwrap();

        let ToolResult::Search(outcome) = result else {
            panic!("expected a search outcome");
        };
        assert_eq!(outcome.query, "Who is Ada Lovelace?");
        assert_eq!(outcome.results.len(), 1);
        assert!(outcome.results[0].title.contains("Ada Lovelace"));
        assert!(outcome.results[0].snippet.contains("simulated"));
        assert_eq!(outcome.results[0].url, "https://example.com");
    }

    #[tokio::test]
    async fn search_uses_configured_url() {
        let result = WebSearchTool::new("https://search.internal")
            .execute(serde_json::json!({"query": "rust"}))
            .await
            .unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["results"][0]["url"], "https://search.internal");
        assert_eq!(json["query"], "rust");
    }

    #[tokio::test]
    async fn missing_query_returns_error() {
        let result = WebSearchTool::default().execute(serde_json::json!({})).await;
        assert!(result.is_err());
    }

    #[test]
    fn tool_descriptor() {
        let desc = WebSearchTool::default().descriptor();
        assert_eq!(desc.name, "web_search");
        assert!(!desc.description.is_empty());
    }
}
