//! Currency Service
//!
//! Exchange-rate lookups with a sentinel contract: a missing rate is `None`,
//! never an error. Conversion falls back to the identity rate so the
//! planning loop keeps moving, but tool output flags the fallback instead
//! of silently mis-converting.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

/// Exchange-rate capability. `None` means the rate is unavailable.
#[async_trait]
pub trait RateSource: Send + Sync {
    async fn rate(&self, from: &str, to: &str) -> Option<Decimal>;
}

const DEFAULT_BASE_URL: &str = "https://api.exchangerate-api.com/v4/latest";

/// ExchangeRate-API HTTP client
pub struct ExchangeRateApi {
    client: reqwest::Client,
    base_url: String,
}

impl Default for ExchangeRateApi {
    fn default() -> Self {
        Self::new()
    }
}

impl ExchangeRateApi {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[derive(Deserialize)]
struct RatesResponse {
    #[serde(default)]
    rates: HashMap<String, Decimal>,
}

#[async_trait]
impl RateSource for ExchangeRateApi {
    async fn rate(&self, from: &str, to: &str) -> Option<Decimal> {
        let from = from.trim().to_uppercase();
        let to = to.trim().to_uppercase();

        let result = self
            .client
            .get(format!("{}/{}", self.base_url, from))
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                match response.json::<RatesResponse>().await {
                    Ok(body) => body.rates.get(&to).copied(),
                    Err(e) => {
                        tracing::warn!(error = %e, "rate response parse failed");
                        None
                    }
                }
            }
            Ok(response) => {
                tracing::warn!(status = %response.status(), "rate request rejected");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "rate request failed");
                None
            }
        }
    }
}

/// Fixed-rate mock for tests
#[derive(Default)]
pub struct MockRates {
    rates: HashMap<(String, String), Decimal>,
}

impl MockRates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rate(mut self, from: &str, to: &str, rate: Decimal) -> Self {
        self.rates
            .insert((from.to_uppercase(), to.to_uppercase()), rate);
        self
    }
}

#[async_trait]
impl RateSource for MockRates {
    async fn rate(&self, from: &str, to: &str) -> Option<Decimal> {
        self.rates
            .get(&(from.to_uppercase(), to.to_uppercase()))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_mock_rate_lookup() {
        let rates = MockRates::new().with_rate("USD", "INR", dec!(83.2));
        assert_eq!(rates.rate("usd", "inr").await, Some(dec!(83.2)));
        assert_eq!(rates.rate("USD", "EUR").await, None);
    }
}
