//! Calculator tool — evaluates arithmetic expressions.
//!
//! Input is first sanitized down to digits, `+ - * / ( ) .` and whitespace,
//! then evaluated by a recursive-descent parser over that grammar only.
//! Nothing outside the arithmetic grammar is ever evaluated.

use async_trait::async_trait;
use std::collections::BTreeMap;
use toolroute_core::error::ToolError;
use toolroute_core::tool::{schema, Calculation, Tool, ToolResult};

/// Error payload for any expression that fails to evaluate.
pub const INVALID_EXPRESSION: &str = "Invalid mathematical expression";

/// Deepest nesting of parentheses and unary signs the parser accepts.
const MAX_DEPTH: usize = 256;

pub struct CalculatorTool;

#[async_trait]
impl Tool for CalculatorTool {
    fn name(&self) -> &str {
        "calculator"
    }

    fn description(&self) -> &str {
        "Perform mathematical calculations"
    }

    fn parameter_schema(&self) -> BTreeMap<String, String> {
        schema(&[("expression", "string - the mathematical expression to evaluate")])
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let expression = arguments["expression"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'expression' argument".into()))?;

        let sanitized = sanitize(expression);
        match evaluate(&sanitized) {
            Ok(result) => Ok(ToolResult::Calculation(Calculation {
                expression: expression.to_string(),
                result,
            })),
            Err(reason) => {
                tracing::debug!(expression, %reason, "Calculator rejected expression");
                Ok(ToolResult::failure(INVALID_EXPRESSION))
            }
        }
    }
}

/// Strip every character outside digits, `+ - * / ( ) .` and whitespace.
///
/// Idempotent: `sanitize(&sanitize(s)) == sanitize(s)`.
pub fn sanitize(expr: &str) -> String {
    expr.chars().filter(|c| is_arithmetic_char(*c)).collect()
}

/// Characters permitted in an arithmetic expression.
pub fn is_arithmetic_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '+' | '-' | '*' | '/' | '(' | ')' | '.') || c.is_whitespace()
}

// ── Recursive-descent expression evaluator ────────────────────────────────

/// Evaluate a sanitized arithmetic expression. Non-finite results are errors.
pub fn evaluate(expr: &str) -> Result<f64, String> {
    let tokens = tokenize(expr)?;
    let mut parser = Parser::new(&tokens);
    let result = parser.parse_expr()?;
    if parser.pos < parser.tokens.len() {
        return Err(format!(
            "Unexpected token at position {}: {:?}",
            parser.pos, parser.tokens[parser.pos]
        ));
    }
    if !result.is_finite() {
        return Err("Result is not a finite number".into());
    }
    Ok(result)
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

fn tokenize(input: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = input.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            c if c.is_whitespace() => i += 1,
            '+' => { tokens.push(Token::Plus); i += 1; }
            '-' => { tokens.push(Token::Minus); i += 1; }
            '*' => { tokens.push(Token::Star); i += 1; }
            '/' => { tokens.push(Token::Slash); i += 1; }
            '(' => { tokens.push(Token::LParen); i += 1; }
            ')' => { tokens.push(Token::RParen); i += 1; }
            c if c.is_ascii_digit() || c == '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let num_str: String = chars[start..i].iter().collect();
                let num: f64 = num_str
                    .parse()
                    .map_err(|_| format!("Invalid number: {num_str}"))?;
                tokens.push(Token::Number(num));
            }
            c => return Err(format!("Unexpected character: '{c}'")),
        }
    }

    Ok(tokens)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    /// Run `f` one nesting level deeper, failing past [`MAX_DEPTH`].
    fn nested(&mut self, f: impl FnOnce(&mut Self) -> Result<f64, String>) -> Result<f64, String> {
        if self.depth >= MAX_DEPTH {
            return Err(format!("Expression nested deeper than {MAX_DEPTH} levels"));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn consume(&mut self) -> Option<&Token> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    // expr = term (('+' | '-') term)*
    fn parse_expr(&mut self) -> Result<f64, String> {
        let mut left = self.parse_term()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Plus => {
                    self.consume();
                    left += self.parse_term()?;
                }
                Token::Minus => {
                    self.consume();
                    left -= self.parse_term()?;
                }
                _ => break,
            }
        }
        Ok(left)
    }

    // term = unary (('*' | '/') unary)*
    fn parse_term(&mut self) -> Result<f64, String> {
        let mut left = self.parse_unary()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Star => {
                    self.consume();
                    left *= self.parse_unary()?;
                }
                Token::Slash => {
                    self.consume();
                    let right = self.parse_unary()?;
                    if right == 0.0 {
                        return Err("Division by zero".into());
                    }
                    left /= right;
                }
                _ => break,
            }
        }
        Ok(left)
    }

    // unary = ('-' | '+') unary | primary
    fn parse_unary(&mut self) -> Result<f64, String> {
        match self.peek() {
            Some(Token::Minus) => {
                self.consume();
                Ok(-self.nested(Self::parse_unary)?)
            }
            Some(Token::Plus) => {
                self.consume();
                self.nested(Self::parse_unary)
            }
            _ => self.parse_primary(),
        }
    }

    // primary = NUMBER | '(' expr ')'
    fn parse_primary(&mut self) -> Result<f64, String> {
        match self.consume() {
            Some(Token::Number(n)) => Ok(*n),
            Some(Token::LParen) => {
                let val = self.nested(Self::parse_expr)?;
                match self.consume() {
                    Some(Token::RParen) => Ok(val),
                    _ => Err("Expected closing parenthesis".into()),
                }
            }
            Some(tok) => Err(format!("Unexpected token: {tok:?}")),
            None => Err("Unexpected end of expression".into()),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_addition() {
        assert_eq!(evaluate("2 + 3").unwrap(), 5.0);
    }

    #[test]
    fn operator_precedence() {
        assert_eq!(evaluate("15 * 23 + 45").unwrap(), 390.0);
    }

    #[test]
    fn parentheses() {
        assert_eq!(evaluate("(2 + 3) * 4").unwrap(), 20.0);
    }

    #[test]
    fn nested_parentheses() {
        assert_eq!(evaluate("((1 + 2) * (3 + 4))").unwrap(), 21.0);
    }

    #[test]
    fn division() {
        assert_eq!(evaluate("10 / 4").unwrap(), 2.5);
    }

    #[test]
    fn division_by_zero() {
        assert!(evaluate("1 / 0").is_err());
    }

    #[test]
    fn unary_signs() {
        assert_eq!(evaluate("-5 + 3").unwrap(), -2.0);
        assert_eq!(evaluate("+4 - -1").unwrap(), 5.0);
    }

    #[test]
    fn complex_expression() {
        let result = evaluate("(10 + 5) / 3 - 2 * (1 + 1)").unwrap();
        assert!((result - 1.0).abs() < 1e-10);
    }

    #[test]
    fn malformed_expressions() {
        assert!(evaluate("2 +").is_err());
        assert!(evaluate("").is_err());
        assert!(evaluate("1.2.3 + 1").is_err());
        assert!(evaluate("(1 + 2").is_err());
        assert!(evaluate("2 3").is_err());
    }

    #[test]
    fn deep_nesting_is_rejected_not_overflowed() {
        let parens = format!("{}1{}", "(".repeat(100_000), ")".repeat(100_000));
        assert!(evaluate(&parens).is_err());

        let signs = format!("{}1", "-".repeat(100_000));
        assert!(evaluate(&signs).is_err());

        let unclosed = format!("{}1", "(".repeat(200_000));
        assert!(evaluate(&unclosed).is_err());
    }

    #[test]
    fn moderate_nesting_still_evaluates() {
        let parens = format!("{}7{}", "(".repeat(100), ")".repeat(100));
        assert_eq!(evaluate(&parens).unwrap(), 7.0);
        assert_eq!(evaluate(&format!("{}3", "-".repeat(100))).unwrap(), 3.0);
    }

    #[test]
    fn sanitize_strips_disallowed_characters() {
        assert_eq!(sanitize("2 + 2; rm -rf /"), "2 + 2  - /");
        assert_eq!(sanitize("alert(1)*3"), "(1)*3");
        assert_eq!(sanitize("x = 4 ^ 2"), "  4  2");
    }

    #[test]
    fn sanitize_is_idempotent() {
        for input in ["Calculate 15 * 23 + 45", "a(b)c.d/e", "", "üñí 3 − 2", "1e5 + 0x10"] {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once);
        }
    }

    #[tokio::test]
    async fn tool_execute() {
        let result = CalculatorTool
            .execute(serde_json::json!({"expression": "15 * 23 + 45"}))
            .await
            .unwrap();

        assert_eq!(
            result,
            ToolResult::Calculation(Calculation {
                expression: "15 * 23 + 45".into(),
                result: 390.0,
            })
        );
    }

    #[tokio::test]
    async fn tool_evaluates_sanitized_text() {
        let result = CalculatorTool
            .execute(serde_json::json!({"expression": "abc 6 * 7"}))
            .await
            .unwrap();

        match result {
            ToolResult::Calculation(calc) => {
                assert_eq!(calc.result, 42.0);
                assert_eq!(calc.expression, "abc 6 * 7");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn tool_reports_invalid_expression() {
        for expr in ["1 / 0", "(((", "2 * * 3", "hello"] {
            let result = CalculatorTool
                .execute(serde_json::json!({"expression": expr}))
                .await
                .unwrap();
            assert_eq!(result.error(), Some(INVALID_EXPRESSION), "expression {expr:?}");
        }
    }

    #[tokio::test]
    async fn tool_missing_expression() {
        let result = CalculatorTool.execute(serde_json::json!({})).await;
        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
    }

    #[test]
    fn tool_descriptor() {
        let desc = CalculatorTool.descriptor();
        assert_eq!(desc.name, "calculator");
        assert!(desc.parameter_schema.contains_key("expression"));
    }
}
