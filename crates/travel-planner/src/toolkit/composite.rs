//! Composite Planning Tools
//!
//! Higher-level tools that orchestrate the primitive lookups and render a
//! multi-section document. Composite tools never return an error: bad input
//! and internal failures become descriptive text the conversation loop can
//! work with.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;

use agent_core::{
    tool::ParameterSchema, Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema,
};

use super::search_tools::{flight_query, hotel_query};
use crate::budget::BudgetMode;
use crate::plan::{render_day_plan, render_trip_plan, DayPlanInput, TripWindow};
use crate::search::ProviderChain;
use crate::weather::WeatherProvider;

/// `create_trip_plan`: flights + hotel + weather in one document
pub struct TripPlanTool {
    flights: ProviderChain,
    hotels: ProviderChain,
    weather: Arc<dyn WeatherProvider>,
}

impl TripPlanTool {
    pub fn new(
        flights: ProviderChain,
        hotels: ProviderChain,
        weather: Arc<dyn WeatherProvider>,
    ) -> Self {
        Self {
            flights,
            hotels,
            weather,
        }
    }
}

#[async_trait]
impl Tool for TripPlanTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "create_trip_plan".into(),
            description:
                "Create a full travel plan: travel and arrival day, flights, hotel information, weather forecast, dates and duration."
                    .into(),
            parameters: vec![
                ParameterSchema::required("city", "string", "Destination city"),
                ParameterSchema::required("origin", "string", "Departure city"),
                ParameterSchema::optional(
                    "start_date",
                    "string",
                    "Trip start date (YYYY-MM-DD); defaults to tomorrow",
                    None,
                ),
                ParameterSchema::optional(
                    "end_date",
                    "string",
                    "Trip end date (YYYY-MM-DD); defaults to start + 4 days",
                    None,
                ),
            ],
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let city = call.str_arg("city").unwrap_or_default();
        let origin = call.str_arg("origin").unwrap_or_default();

        let window = match TripWindow::resolve(
            origin,
            city,
            call.str_arg("start_date"),
            call.str_arg("end_date"),
        ) {
            Ok(window) => window,
            Err(message) => return Ok(ToolResult::failure("create_trip_plan", message)),
        };

        let start = window.start.format("%Y-%m-%d").to_string();
        let end = window.end.format("%Y-%m-%d").to_string();

        // Degrade each section independently; a missing block must not sink
        // the whole document.
        let flights = match self
            .flights
            .resolve(&flight_query(origin, city, &start, &end))
            .await
        {
            Ok(hit) => hit.text,
            Err(e) => {
                tracing::warn!(error = %e, "flight lookup failed inside trip plan");
                "Flight information not available right now.".into()
            }
        };

        let hotels = match self.hotels.resolve(&hotel_query(city, "Below-Expensive")).await {
            Ok(hit) => hit.text,
            Err(e) => {
                tracing::warn!(error = %e, "hotel lookup failed inside trip plan");
                "Hotel info not available".into()
            }
        };

        let forecast_days = window.duration_days().clamp(1, 5) as u32;
        let entries = self.weather.forecast(city, forecast_days).await;
        let weather = if entries.is_empty() {
            "Weather forecast unavailable.".to_string()
        } else {
            entries
                .iter()
                .map(|e| format!("{}: {:.1}°C, {}", e.timestamp, e.temp_c, e.description))
                .collect::<Vec<_>>()
                .join("\n")
        };

        Ok(ToolResult::success(
            "create_trip_plan",
            render_trip_plan(&window, &flights, &hotels, &weather),
        ))
    }
}

/// `create_day_plan`: one day's itinerary shaped by the weather
pub struct DayPlanTool;

#[async_trait]
impl Tool for DayPlanTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "create_day_plan".into(),
            description:
                "Create a detailed day itinerary based on weather, attractions, food, and budget."
                    .into(),
            parameters: vec![
                ParameterSchema::required("city", "string", "City the day is spent in"),
                ParameterSchema::required("day_number", "integer", "Day number within the trip"),
                ParameterSchema::required(
                    "weather",
                    "string",
                    "Weather description for the day (from the forecast tool)",
                ),
                ParameterSchema::required(
                    "attractions",
                    "string",
                    "Comma-separated attraction names; the first two anchor morning and afternoon",
                ),
                ParameterSchema::optional(
                    "restaurants",
                    "string",
                    "Restaurant suggestions for dinner",
                    None,
                ),
                ParameterSchema::optional(
                    "total_budget",
                    "number",
                    "Total trip budget",
                    Some(serde_json::json!(0)),
                ),
                ParameterSchema::optional(
                    "num_days",
                    "integer",
                    "Number of days in the trip",
                    Some(serde_json::json!(1)),
                ),
                ParameterSchema::optional(
                    "mode",
                    "string",
                    "Spending mode: 'budget', 'standard', or 'luxury'",
                    Some(serde_json::json!("standard")),
                ),
            ],
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let total_budget = call
            .f64_arg("total_budget")
            .and_then(Decimal::from_f64_retain)
            .unwrap_or(Decimal::ZERO);

        let input = DayPlanInput {
            city: call.str_arg("city").unwrap_or_default(),
            day_number: call.i64_arg("day_number").unwrap_or(1),
            weather: call.str_arg("weather").unwrap_or_default(),
            attractions: call.str_arg("attractions").unwrap_or_default(),
            restaurants: call.str_arg("restaurants"),
            total_budget,
            num_days: call.i64_arg("num_days").unwrap_or(1),
            mode: BudgetMode::parse(call.str_arg("mode").unwrap_or("standard")),
        };

        Ok(ToolResult::success("create_day_plan", render_day_plan(&input)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::StaticSearchProvider;
    use crate::weather::MockWeather;
    use std::sync::Arc;

    fn trip_plan_tool() -> TripPlanTool {
        let fallback: Arc<dyn crate::search::SearchProvider> = Arc::new(StaticSearchProvider::ok(
            "fallback",
            "Hotel Lux - city centre, from $120 a night, breakfast included.",
        ));
        TripPlanTool::new(
            ProviderChain::new(fallback.clone()),
            ProviderChain::new(fallback),
            Arc::new(MockWeather::new("clear sky", 22.0)),
        )
    }

    #[tokio::test]
    async fn test_invalid_date_range_is_text_not_error() {
        let tool = trip_plan_tool();
        let call = ToolCall::new("create_trip_plan")
            .with_arg("city", serde_json::json!("Paris"))
            .with_arg("origin", serde_json::json!("Delhi"))
            .with_arg("start_date", serde_json::json!("2026-09-12"))
            .with_arg("end_date", serde_json::json!("2026-09-10"));

        let result = tool.execute(&call).await.unwrap();
        assert!(!result.success);
        assert!(result.output.contains("Invalid date range"));
    }

    #[tokio::test]
    async fn test_trip_plan_renders_all_sections() {
        let tool = trip_plan_tool();
        let call = ToolCall::new("create_trip_plan")
            .with_arg("city", serde_json::json!("Paris"))
            .with_arg("origin", serde_json::json!("Delhi"))
            .with_arg("start_date", serde_json::json!("2026-09-10"))
            .with_arg("end_date", serde_json::json!("2026-09-12"));

        let result = tool.execute(&call).await.unwrap();
        assert!(result.success);
        assert!(result.output.contains("# Trip Plan for Paris"));
        assert!(result.output.contains("**Duration:** 3 Days"));
        assert!(result.output.contains("Suggested Hotel: Hotel Lux"));
        assert!(result.output.contains("clear sky"));
    }

    #[tokio::test]
    async fn test_trip_plan_degrades_when_search_is_down() {
        let broken: Arc<dyn crate::search::SearchProvider> =
            Arc::new(StaticSearchProvider::failing("fallback", "offline"));
        let tool = TripPlanTool::new(
            ProviderChain::new(broken.clone()),
            ProviderChain::new(broken),
            Arc::new(MockWeather::new("clear sky", 22.0)),
        );
        let call = ToolCall::new("create_trip_plan")
            .with_arg("city", serde_json::json!("Paris"))
            .with_arg("origin", serde_json::json!("Delhi"));

        let result = tool.execute(&call).await.unwrap();
        assert!(result.success);
        assert!(result.output.contains("Flight information not available"));
        assert!(result.output.contains("Hotel info not available"));
    }

    #[tokio::test]
    async fn test_day_plan_rainy_branch() {
        let call = ToolCall::new("create_day_plan")
            .with_arg("city", serde_json::json!("Paris"))
            .with_arg("day_number", serde_json::json!(1))
            .with_arg("weather", serde_json::json!("light rain"))
            .with_arg("attractions", serde_json::json!("Louvre, Pantheon"))
            .with_arg("total_budget", serde_json::json!(900.0))
            .with_arg("num_days", serde_json::json!(3));

        let result = DayPlanTool.execute(&call).await.unwrap();
        assert!(result.success);
        assert!(result.output.contains("Louvre (indoor)"));
        assert!(result.output.contains("umbrella"));
        assert!(result.output.contains("- Stay: $360.00"));
    }
}
