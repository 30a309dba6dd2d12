//! Weather Service
//!
//! Single-provider lookups against OpenWeather. Unavailability is a
//! sentinel, not an error: callers branch on `None` / empty rather than
//! catching anything.

use async_trait::async_trait;
use serde::Deserialize;

/// Current conditions for a city
#[derive(Clone, Debug)]
pub struct CurrentConditions {
    pub temp_c: f64,
    pub feels_like_c: f64,
    pub description: String,
    pub wind_speed_ms: f64,
}

/// One three-hour forecast slot
#[derive(Clone, Debug)]
pub struct ForecastEntry {
    /// Slot timestamp as reported by the API ("YYYY-MM-DD HH:MM:SS")
    pub timestamp: String,
    pub temp_c: f64,
    pub description: String,
}

/// Weather capability. `None` / empty means "unavailable", never panics
/// or errors upward.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current(&self, city: &str) -> Option<CurrentConditions>;

    /// Forecast slots for up to `days` days (8 three-hour slots per day).
    /// Empty when unavailable.
    async fn forecast(&self, city: &str, days: u32) -> Vec<ForecastEntry>;
}

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// OpenWeather HTTP client
pub struct OpenWeatherClient {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl OpenWeatherClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url.into(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Option<T> {
        let key = self.api_key.as_ref()?;

        let mut query: Vec<(&str, String)> = params.to_vec();
        query.push(("appid", key.clone()));
        query.push(("units", "metric".into()));

        let result = self
            .client
            .get(format!("{}/{}", self.base_url, path))
            .query(&query)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => match response.json().await {
                Ok(body) => Some(body),
                Err(e) => {
                    tracing::warn!(error = %e, "weather response parse failed");
                    None
                }
            },
            Ok(response) => {
                tracing::warn!(status = %response.status(), "weather request rejected");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "weather request failed");
                None
            }
        }
    }
}

#[derive(Deserialize)]
struct CurrentResponse {
    main: MainBlock,
    #[serde(default)]
    weather: Vec<WeatherBlock>,
    wind: WindBlock,
}

#[derive(Deserialize)]
struct MainBlock {
    temp: f64,
    feels_like: f64,
}

#[derive(Deserialize)]
struct WeatherBlock {
    description: String,
}

#[derive(Deserialize)]
struct WindBlock {
    speed: f64,
}

#[derive(Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    list: Vec<ForecastSlot>,
}

#[derive(Deserialize)]
struct ForecastSlot {
    dt_txt: String,
    main: MainBlock,
    #[serde(default)]
    weather: Vec<WeatherBlock>,
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current(&self, city: &str) -> Option<CurrentConditions> {
        let response: CurrentResponse = self
            .get_json("weather", &[("q", city.to_string())])
            .await?;

        Some(CurrentConditions {
            temp_c: response.main.temp,
            feels_like_c: response.main.feels_like,
            description: response
                .weather
                .first()
                .map(|w| w.description.clone())
                .unwrap_or_default(),
            wind_speed_ms: response.wind.speed,
        })
    }

    async fn forecast(&self, city: &str, days: u32) -> Vec<ForecastEntry> {
        let Some(response) = self
            .get_json::<ForecastResponse>(
                "forecast",
                &[("q", city.to_string()), ("cnt", (days * 8).to_string())],
            )
            .await
        else {
            return Vec::new();
        };

        response
            .list
            .into_iter()
            .map(|slot| ForecastEntry {
                timestamp: slot.dt_txt,
                temp_c: slot.main.temp,
                description: slot
                    .weather
                    .first()
                    .map(|w| w.description.clone())
                    .unwrap_or_default(),
            })
            .collect()
    }
}

/// Fixed-weather mock for tests and offline demos
pub struct MockWeather {
    description: String,
    temp_c: f64,
}

impl MockWeather {
    pub fn new(description: impl Into<String>, temp_c: f64) -> Self {
        Self {
            description: description.into(),
            temp_c,
        }
    }

    /// A provider that always reports unavailability
    pub fn unavailable() -> UnavailableWeather {
        UnavailableWeather
    }
}

#[async_trait]
impl WeatherProvider for MockWeather {
    async fn current(&self, _city: &str) -> Option<CurrentConditions> {
        Some(CurrentConditions {
            temp_c: self.temp_c,
            feels_like_c: self.temp_c - 1.0,
            description: self.description.clone(),
            wind_speed_ms: 3.4,
        })
    }

    async fn forecast(&self, _city: &str, days: u32) -> Vec<ForecastEntry> {
        (0..days * 8)
            .map(|slot| ForecastEntry {
                timestamp: format!("2026-09-{:02} {:02}:00:00", 1 + slot / 8, (slot % 8) * 3),
                temp_c: self.temp_c,
                description: self.description.clone(),
            })
            .collect()
    }
}

/// Weather provider that always returns the sentinel
pub struct UnavailableWeather;

#[async_trait]
impl WeatherProvider for UnavailableWeather {
    async fn current(&self, _city: &str) -> Option<CurrentConditions> {
        None
    }

    async fn forecast(&self, _city: &str, _days: u32) -> Vec<ForecastEntry> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_key_is_sentinel() {
        let client = OpenWeatherClient::new(None);
        assert!(client.current("Paris").await.is_none());
        assert!(client.forecast("Paris", 3).await.is_empty());
    }

    #[tokio::test]
    async fn test_mock_forecast_slot_count() {
        let mock = MockWeather::new("clear sky", 24.0);
        assert_eq!(mock.forecast("Paris", 3).await.len(), 24);
    }
}
