//! Currency Tools
//!
//! Conversion and rate lookup. A missing live rate degrades to the identity
//! rate 1.0 so planning keeps moving, with the fallback called out in the
//! output text.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use agent_core::{
    tool::ParameterSchema, Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema,
};

use crate::currency::RateSource;

fn currency_args(call: &ToolCall) -> (String, String) {
    let from = call.str_arg("from_currency").unwrap_or("USD").to_uppercase();
    let to = call.str_arg("to_currency").unwrap_or("USD").to_uppercase();
    (from, to)
}

/// `convert_currency`
pub struct ConvertCurrencyTool {
    rates: Arc<dyn RateSource>,
}

impl ConvertCurrencyTool {
    pub fn new(rates: Arc<dyn RateSource>) -> Self {
        Self { rates }
    }
}

#[async_trait]
impl Tool for ConvertCurrencyTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "convert_currency".into(),
            description: "Convert an amount between two currencies using live exchange rates."
                .into(),
            parameters: vec![
                ParameterSchema::required("amount", "number", "Amount to convert"),
                ParameterSchema::required("from_currency", "string", "Source currency code"),
                ParameterSchema::required("to_currency", "string", "Target currency code"),
            ],
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let amount = call
            .f64_arg("amount")
            .and_then(Decimal::from_f64_retain)
            .unwrap_or(Decimal::ZERO);
        let (from, to) = currency_args(call);

        let output = match self.rates.rate(&from, &to).await {
            Some(rate) => {
                let converted = (amount * rate).round_dp(2);
                format!("{amount} {from} = {converted} {to} (rate {rate})")
            }
            None => format!(
                "{amount} {from} = {amount} {to} (live rate unavailable, amount returned unconverted)"
            ),
        };

        Ok(ToolResult::success("convert_currency", output))
    }
}

/// `get_exchange_rate`
pub struct ExchangeRateTool {
    rates: Arc<dyn RateSource>,
}

impl ExchangeRateTool {
    pub fn new(rates: Arc<dyn RateSource>) -> Self {
        Self { rates }
    }
}

#[async_trait]
impl Tool for ExchangeRateTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_exchange_rate".into(),
            description: "Get the live exchange rate between two currencies.".into(),
            parameters: vec![
                ParameterSchema::required("from_currency", "string", "Source currency code"),
                ParameterSchema::required("to_currency", "string", "Target currency code"),
            ],
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let (from, to) = currency_args(call);

        let output = match self.rates.rate(&from, &to).await {
            Some(rate) => format!("1 {from} = {rate} {to}"),
            None => format!("1 {from} = {} {to} (live rate unavailable)", dec!(1.0)),
        };

        Ok(ToolResult::success("get_exchange_rate", output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::MockRates;

    #[tokio::test]
    async fn test_conversion_with_live_rate() {
        let rates = Arc::new(MockRates::new().with_rate("USD", "INR", dec!(83.2)));
        let tool = ConvertCurrencyTool::new(rates);
        let call = ToolCall::new("convert_currency")
            .with_arg("amount", serde_json::json!(100.0))
            .with_arg("from_currency", serde_json::json!("USD"))
            .with_arg("to_currency", serde_json::json!("INR"));

        let result = tool.execute(&call).await.unwrap();
        assert!(result.output.contains("100 USD = 8320.00 INR"));
    }

    #[tokio::test]
    async fn test_missing_rate_flags_identity_fallback() {
        let tool = ConvertCurrencyTool::new(Arc::new(MockRates::new()));
        let call = ToolCall::new("convert_currency")
            .with_arg("amount", serde_json::json!(100.0))
            .with_arg("from_currency", serde_json::json!("USD"))
            .with_arg("to_currency", serde_json::json!("XYZ"));

        let result = tool.execute(&call).await.unwrap();
        assert!(result.success);
        assert!(result.output.contains("unavailable"));
        assert!(result.output.contains("100 USD = 100 XYZ"));
    }

    #[tokio::test]
    async fn test_rate_lookup_identity_fallback() {
        let tool = ExchangeRateTool::new(Arc::new(MockRates::new()));
        let call = ToolCall::new("get_exchange_rate")
            .with_arg("from_currency", serde_json::json!("USD"))
            .with_arg("to_currency", serde_json::json!("XYZ"));

        let result = tool.execute(&call).await.unwrap();
        assert!(result.output.contains("1 USD = 1.0 XYZ"));
    }
}
