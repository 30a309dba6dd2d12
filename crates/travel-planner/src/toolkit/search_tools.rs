//! Live Search Tools
//!
//! Hotels, flights, restaurants, transportation and attractions, each backed
//! by its own provider fallback chain. The chain catches provider-level
//! failures internally; only the terminal provider's failure reaches the
//! loop, as a tool error it can log.

use async_trait::async_trait;

use agent_core::{
    tool::ParameterSchema, Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema,
};

use crate::search::ProviderChain;

const DEFAULT_BUDGET_RANGE: &str = "Below-Expensive";

pub(crate) fn hotel_query(city: &str, budget_range: &str) -> String {
    format!("best {budget_range} accommodations hotels to stay in {city} with prices, reviews")
}

pub(crate) fn flight_query(origin: &str, destination: &str, start: &str, end: &str) -> String {
    format!(
        "flights from {origin} to {destination} departing on {start} and returning on {end} with price, airline, and timing info"
    )
}

/// `search_hotels`: places -> serp -> serper -> generic search
pub struct SearchHotelsTool {
    chain: ProviderChain,
}

impl SearchHotelsTool {
    pub fn new(chain: ProviderChain) -> Self {
        Self { chain }
    }
}

#[async_trait]
impl Tool for SearchHotelsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "search_hotels".into(),
            description:
                "Search for hotels in a city using real-time sources, with prices and reviews."
                    .into(),
            parameters: vec![
                ParameterSchema::required("city", "string", "City to find hotels in"),
                ParameterSchema::optional(
                    "budget_range",
                    "string",
                    "Price band preference, e.g. 'Below-Expensive' or 'Luxury'",
                    Some(serde_json::json!(DEFAULT_BUDGET_RANGE)),
                ),
            ],
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let city = call.str_arg("city").unwrap_or_default();
        let budget_range = call.str_arg("budget_range").unwrap_or(DEFAULT_BUDGET_RANGE);

        let query = hotel_query(city, budget_range);
        let hit = self.chain.resolve(&query).await?;

        Ok(ToolResult::success(
            "search_hotels",
            format!("Hotel results via {}:\n{}", hit.provider, hit.text),
        ))
    }
}

/// `search_flights`: serp -> serper -> generic search
pub struct SearchFlightsTool {
    chain: ProviderChain,
}

impl SearchFlightsTool {
    pub fn new(chain: ProviderChain) -> Self {
        Self { chain }
    }
}

#[async_trait]
impl Tool for SearchFlightsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "search_flights".into(),
            description:
                "Search for round-trip flights between two cities within a date range, with price, airline and timing info."
                    .into(),
            parameters: vec![
                ParameterSchema::required("origin", "string", "Departure city"),
                ParameterSchema::required("destination", "string", "Arrival city"),
                ParameterSchema::required("start_date", "string", "Trip start date (YYYY-MM-DD)"),
                ParameterSchema::required("end_date", "string", "Return date (YYYY-MM-DD)"),
            ],
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let origin = call.str_arg("origin").unwrap_or_default();
        let destination = call.str_arg("destination").unwrap_or_default();
        let start_date = call.str_arg("start_date").unwrap_or_default();
        let end_date = call.str_arg("end_date").unwrap_or_default();

        let query = flight_query(origin, destination, start_date, end_date);
        let hit = self.chain.resolve(&query).await?;

        Ok(ToolResult::success(
            "search_flights",
            format!("Flight options via {}:\n{}", hit.provider, hit.text),
        ))
    }
}

/// `search_restaurants`: places -> serp -> generic search
pub struct SearchRestaurantsTool {
    chain: ProviderChain,
}

impl SearchRestaurantsTool {
    pub fn new(chain: ProviderChain) -> Self {
        Self { chain }
    }
}

#[async_trait]
impl Tool for SearchRestaurantsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "search_restaurants".into(),
            description: "Search for top-rated restaurants and food places in a city.".into(),
            parameters: vec![ParameterSchema::required(
                "city",
                "string",
                "City to find restaurants in",
            )],
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let city = call.str_arg("city").unwrap_or_default();

        let query = format!("best restaurants and food places to eat in {city}");
        let hit = self.chain.resolve(&query).await?;

        Ok(ToolResult::success(
            "search_restaurants",
            format!("Restaurant suggestions via {}:\n{}", hit.provider, hit.text),
        ))
    }
}

/// `search_transportation`: serp -> serper -> generic search
pub struct SearchTransportationTool {
    chain: ProviderChain,
}

impl SearchTransportationTool {
    pub fn new(chain: ProviderChain) -> Self {
        Self { chain }
    }
}

#[async_trait]
impl Tool for SearchTransportationTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "search_transportation".into(),
            description: "Search for public and private transportation options in a city.".into(),
            parameters: vec![ParameterSchema::required(
                "city",
                "string",
                "City to find transit options in",
            )],
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let city = call.str_arg("city").unwrap_or_default();

        let query = format!(
            "transportation options in {city} including metro, bus, cab, ride-hailing, and local transit"
        );
        let hit = self.chain.resolve(&query).await?;

        Ok(ToolResult::success(
            "search_transportation",
            format!("Transport info via {}:\n{}", hit.provider, hit.text),
        ))
    }
}

/// `search_attractions`: places -> serp -> serper -> generic search
pub struct SearchAttractionsTool {
    chain: ProviderChain,
}

impl SearchAttractionsTool {
    pub fn new(chain: ProviderChain) -> Self {
        Self { chain }
    }
}

#[async_trait]
impl Tool for SearchAttractionsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "search_attractions".into(),
            description: "Search for top tourist attractions and activities in a city.".into(),
            parameters: vec![ParameterSchema::required(
                "city",
                "string",
                "City to find attractions in",
            )],
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let city = call.str_arg("city").unwrap_or_default();

        let query = format!("top attractions, activities, and things to do in {city}");
        let hit = self.chain.resolve(&query).await?;

        Ok(ToolResult::success(
            "search_attractions",
            format!("Attractions via {}:\n{}", hit.provider, hit.text),
        ))
    }
}
