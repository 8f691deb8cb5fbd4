//! Currency converter tool — converts amounts using a static rate table.
//!
//! Rates are expressed as units per 1 USD. In production this would read
//! real-time rates from an FX feed.
//!
//! Unknown codes convert at a neutral rate of 1.0 and log a warning, unless
//! the tool is built in strict mode, where they produce an error payload.

use async_trait::async_trait;
use std::collections::BTreeMap;
use toolroute_core::error::ToolError;
use toolroute_core::tool::{schema, Conversion, Tool, ToolResult};

const NOTE: &str = "This uses simulated exchange rates. In production, this would use real-time \
                    rates from a currency API.";

/// Error payload for conversions whose result is not a finite number.
pub const OUT_OF_RANGE: &str = "Conversion result is out of range";

pub struct CurrencyConverterTool {
    rates: BTreeMap<String, f64>,
    strict: bool,
}

impl CurrencyConverterTool {
    pub fn new(rates: BTreeMap<String, f64>) -> Self {
        Self {
            rates,
            strict: false,
        }
    }

    /// Reject unknown currency codes instead of using a neutral rate.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Look up the rate for `code`, or `None` if the table has no entry.
    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }

    /// `amount / rate[from] * rate[to]`, rounded to two decimal places.
    /// Results that overflow `f64` are errors.
    pub fn convert(&self, amount: f64, from: &str, to: &str) -> Result<f64, String> {
        let from_rate = self.resolve(from)?;
        let to_rate = self.resolve(to)?;
        let result = round2(amount / from_rate * to_rate);
        if !result.is_finite() {
            return Err(OUT_OF_RANGE.to_string());
        }
        Ok(result)
    }

    fn resolve(&self, code: &str) -> Result<f64, String> {
        match self.rate(code) {
            Some(rate) => Ok(rate),
            None if self.strict => Err(format!("Unknown currency code: {code}")),
            None => {
                tracing::warn!(code, "Unknown currency code, converting at neutral rate 1.0");
                Ok(1.0)
            }
        }
    }
}

impl Default for CurrencyConverterTool {
    fn default() -> Self {
        Self::new(toolroute_config::default_rates())
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[async_trait]
impl Tool for CurrencyConverterTool {
    fn name(&self) -> &str {
        "currency_converter"
    }

    fn description(&self) -> &str {
        "Convert between different currencies"
    }

    fn parameter_schema(&self) -> BTreeMap<String, String> {
        schema(&[
            ("amount", "number - the amount to convert"),
            ("from", "string - source currency code (e.g., USD)"),
            ("to", "string - target currency code (e.g., EUR)"),
        ])
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let amount = arguments["amount"]
            .as_f64()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'amount' argument".into()))?;
        let from = arguments["from"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'from' argument".into()))?
            .to_uppercase();
        let to = arguments["to"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'to' argument".into()))?
            .to_uppercase();

        match self.convert(amount, &from, &to) {
            Ok(result) => Ok(ToolResult::Conversion(Conversion {
                amount,
                from,
                to,
                result,
                note: NOTE.to_string(),
            })),
            Err(reason) => Ok(ToolResult::failure(reason)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn run(tool: &CurrencyConverterTool, args: serde_json::Value) -> ToolResult {
        tool.execute(args).await.unwrap()
    }

    #[tokio::test]
    async fn usd_to_eur() {
        let result = run(
            &CurrencyConverterTool::default(),
            serde_json::json!({"amount": 100, "from": "USD", "to": "EUR"}),
        )
        .await;

        let ToolResult::Conversion(conv) = result else {
            panic!("expected a conversion");
        };
        assert_eq!(conv.from, "USD");
        assert_eq!(conv.to, "EUR");
        assert_eq!(format!("{:.2}", conv.result), "92.00");
    }

    #[test]
    fn known_pairs_match_rate_formula() {
        let tool = CurrencyConverterTool::default();
        let codes = ["USD", "EUR", "GBP", "JPY", "CAD", "AUD"];
        for amount in [1.0, 12.5, 100.0, 999.99] {
            for from in codes {
                for to in codes {
                    let expected = round2(amount / tool.rate(from).unwrap() * tool.rate(to).unwrap());
                    assert_eq!(tool.convert(amount, from, to).unwrap(), expected);
                }
            }
        }
    }

    #[test]
    fn result_is_rounded_to_cents() {
        let tool = CurrencyConverterTool::default();
        // 10 / 0.79 = 12.658...
        assert_eq!(tool.convert(10.0, "GBP", "USD").unwrap(), 12.66);
    }

    #[tokio::test]
    async fn lowercase_codes_are_normalized() {
        let result = run(
            &CurrencyConverterTool::default(),
            serde_json::json!({"amount": 50.0, "from": "gbp", "to": "jpy"}),
        )
        .await;
        let ToolResult::Conversion(conv) = result else {
            panic!("expected a conversion");
        };
        assert_eq!(conv.from, "GBP");
        assert_eq!(conv.to, "JPY");
    }

    #[tokio::test]
    async fn unknown_code_uses_neutral_rate_by_default() {
        let result = run(
            &CurrencyConverterTool::default(),
            serde_json::json!({"amount": 10, "from": "XYZ", "to": "EUR"}),
        )
        .await;
        let ToolResult::Conversion(conv) = result else {
            panic!("expected a conversion");
        };
        assert_eq!(conv.result, 9.2);
    }

    #[tokio::test]
    async fn unknown_code_rejected_in_strict_mode() {
        let tool = CurrencyConverterTool::default().strict(true);
        let result = run(&tool, serde_json::json!({"amount": 10, "from": "USD", "to": "XYZ"})).await;
        assert_eq!(result.error(), Some("Unknown currency code: XYZ"));
    }

    #[tokio::test]
    async fn overflowing_conversion_is_an_error() {
        let tool = CurrencyConverterTool::default();
        assert_eq!(tool.convert(f64::MAX, "USD", "JPY"), Err(OUT_OF_RANGE.to_string()));

        let result = run(&tool, serde_json::json!({"amount": 1e308, "from": "USD", "to": "JPY"})).await;
        assert_eq!(result.error(), Some(OUT_OF_RANGE));
        // Still serializable without a null result.
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json, serde_json::json!({"error": OUT_OF_RANGE}));
    }

    #[tokio::test]
    async fn missing_amount_returns_error() {
        let result = CurrencyConverterTool::default()
            .execute(serde_json::json!({"from": "USD", "to": "EUR"}))
            .await;
        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
    }

    #[test]
    fn tool_descriptor() {
        let desc = CurrencyConverterTool::default().descriptor();
        assert_eq!(desc.name, "currency_converter");
        assert_eq!(desc.parameter_schema.len(), 3);
    }
}
