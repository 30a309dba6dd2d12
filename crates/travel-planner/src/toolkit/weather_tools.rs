//! Weather Tools
//!
//! Single-provider lookups. Unavailability comes back as a human-readable
//! sentinel string, never an error.

use std::sync::Arc;

use async_trait::async_trait;

use agent_core::{
    tool::ParameterSchema, Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema,
};

use crate::weather::WeatherProvider;

/// Days covered by the forecast tool
const FORECAST_DAYS: u32 = 3;
/// Slots shown to the model (next ~15 hours)
const FORECAST_PREVIEW_SLOTS: usize = 5;

/// `get_current_weather`
pub struct CurrentWeatherTool {
    weather: Arc<dyn WeatherProvider>,
}

impl CurrentWeatherTool {
    pub fn new(weather: Arc<dyn WeatherProvider>) -> Self {
        Self { weather }
    }
}

#[async_trait]
impl Tool for CurrentWeatherTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_current_weather".into(),
            description: "Get current weather conditions in a city.".into(),
            parameters: city_parameter(),
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let city = call.str_arg("city").unwrap_or_default();

        let output = match self.weather.current(city).await {
            Some(now) => format!(
                "Current weather in {city}:\n\
                 Temperature: {:.1}°C (feels like {:.1}°C)\n\
                 Condition: {}\n\
                 Wind Speed: {:.1} m/s",
                now.temp_c, now.feels_like_c, now.description, now.wind_speed_ms
            ),
            None => {
                "Weather data is currently unavailable. Try again later or check the city name."
                    .into()
            }
        };

        Ok(ToolResult::success("get_current_weather", output))
    }
}

/// `get_weather_forecast`
pub struct WeatherForecastTool {
    weather: Arc<dyn WeatherProvider>,
}

impl WeatherForecastTool {
    pub fn new(weather: Arc<dyn WeatherProvider>) -> Self {
        Self { weather }
    }
}

#[async_trait]
impl Tool for WeatherForecastTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_weather_forecast".into(),
            description: "Get a 3-day weather forecast for a city.".into(),
            parameters: city_parameter(),
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let city = call.str_arg("city").unwrap_or_default();

        let entries = self.weather.forecast(city, FORECAST_DAYS).await;
        let output = if entries.is_empty() {
            "Weather forecast unavailable. Please try another city or check spelling.".to_string()
        } else {
            entries
                .iter()
                .take(FORECAST_PREVIEW_SLOTS)
                .map(|e| format!("{}: {:.1}°C, {}", e.timestamp, e.temp_c, e.description))
                .collect::<Vec<_>>()
                .join("\n")
        };

        Ok(ToolResult::success("get_weather_forecast", output))
    }
}

fn city_parameter() -> Vec<ParameterSchema> {
    vec![ParameterSchema::required(
        "city",
        "string",
        "City to report weather for",
    )]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::{MockWeather, UnavailableWeather};

    #[tokio::test]
    async fn test_current_weather_renders_conditions() {
        let tool = CurrentWeatherTool::new(Arc::new(MockWeather::new("clear sky", 24.0)));
        let call = ToolCall::new("get_current_weather").with_arg("city", serde_json::json!("Rome"));

        let result = tool.execute(&call).await.unwrap();
        assert!(result.output.contains("Current weather in Rome"));
        assert!(result.output.contains("24.0°C"));
        assert!(result.output.contains("clear sky"));
    }

    #[tokio::test]
    async fn test_current_weather_sentinel() {
        let tool = CurrentWeatherTool::new(Arc::new(UnavailableWeather));
        let call = ToolCall::new("get_current_weather").with_arg("city", serde_json::json!("Rome"));

        let result = tool.execute(&call).await.unwrap();
        assert!(result.success);
        assert!(result.output.contains("currently unavailable"));
    }

    #[tokio::test]
    async fn test_forecast_takes_first_five_slots() {
        let tool = WeatherForecastTool::new(Arc::new(MockWeather::new("light rain", 18.0)));
        let call =
            ToolCall::new("get_weather_forecast").with_arg("city", serde_json::json!("Rome"));

        let result = tool.execute(&call).await.unwrap();
        assert_eq!(result.output.lines().count(), 5);
        assert!(result.output.contains("light rain"));
    }
}
