//! Travel Toolkit
//!
//! Domain tools implementing `agent_core::Tool`, wired together from
//! explicit service collaborators. Every tool receives the providers it
//! needs at construction; nothing reads process-wide state at call time.

mod budget_tools;
mod composite;
mod currency_tools;
mod search_tools;
mod weather_tools;

pub use budget_tools::{
    AddCostsTool, DailyBudgetTool, HotelCostTool, TotalExpenseTool, TripAllocationTool,
};
pub use composite::{DayPlanTool, TripPlanTool};
pub use currency_tools::{ConvertCurrencyTool, ExchangeRateTool};
pub use search_tools::{
    SearchAttractionsTool, SearchFlightsTool, SearchHotelsTool, SearchRestaurantsTool,
    SearchTransportationTool,
};
pub use weather_tools::{CurrentWeatherTool, WeatherForecastTool};

use std::sync::Arc;

use agent_core::ToolRegistry;

use crate::config::PlannerConfig;
use crate::currency::{ExchangeRateApi, RateSource};
use crate::search::{
    DuckDuckGoSearch, GooglePlacesSearch, ProviderChain, SearchProvider, SerpApiSearch,
    SerperSearch,
};
use crate::weather::{OpenWeatherClient, WeatherProvider};

/// The service collaborators behind the toolkit.
///
/// Optional entries are providers disabled by a missing key; they simply
/// never appear in a fallback chain. The generic search is the terminal
/// provider of every chain and is always present.
pub struct ToolkitServices {
    pub places: Option<Arc<dyn SearchProvider>>,
    pub serp: Option<Arc<dyn SearchProvider>>,
    pub serper: Option<Arc<dyn SearchProvider>>,
    pub generic_search: Arc<dyn SearchProvider>,
    pub weather: Arc<dyn WeatherProvider>,
    pub rates: Arc<dyn RateSource>,
}

impl ToolkitServices {
    /// Build live services from configuration
    pub fn from_config(config: &PlannerConfig) -> Self {
        let places = config
            .google_places_key
            .as_ref()
            .map(|key| Arc::new(GooglePlacesSearch::new(key)) as Arc<dyn SearchProvider>);
        let serp = config
            .serpapi_key
            .as_ref()
            .map(|key| Arc::new(SerpApiSearch::new(key)) as Arc<dyn SearchProvider>);
        let serper = config
            .serper_key
            .as_ref()
            .map(|key| Arc::new(SerperSearch::new(key)) as Arc<dyn SearchProvider>);

        let weather: Arc<dyn WeatherProvider> = match &config.weather_base_url {
            Some(base) => Arc::new(OpenWeatherClient::with_base_url(
                config.openweather_key.clone(),
                base,
            )),
            None => Arc::new(OpenWeatherClient::new(config.openweather_key.clone())),
        };

        let rates: Arc<dyn RateSource> = match &config.currency_base_url {
            Some(base) => Arc::new(ExchangeRateApi::with_base_url(base)),
            None => Arc::new(ExchangeRateApi::new()),
        };

        Self {
            places,
            serp,
            serper,
            generic_search: Arc::new(DuckDuckGoSearch::new()),
            weather,
            rates,
        }
    }

    // Chain orders are priority, not arbitrary: the richer, keyed sources
    // are tried before the generic search.

    pub fn hotels_chain(&self) -> ProviderChain {
        ProviderChain::new(self.generic_search.clone())
            .then(self.places.clone())
            .then(self.serp.clone())
            .then(self.serper.clone())
    }

    pub fn flights_chain(&self) -> ProviderChain {
        ProviderChain::new(self.generic_search.clone())
            .then(self.serp.clone())
            .then(self.serper.clone())
    }

    pub fn restaurants_chain(&self) -> ProviderChain {
        ProviderChain::new(self.generic_search.clone())
            .then(self.places.clone())
            .then(self.serp.clone())
    }

    pub fn transportation_chain(&self) -> ProviderChain {
        ProviderChain::new(self.generic_search.clone())
            .then(self.serp.clone())
            .then(self.serper.clone())
    }

    pub fn attractions_chain(&self) -> ProviderChain {
        ProviderChain::new(self.generic_search.clone())
            .then(self.places.clone())
            .then(self.serp.clone())
            .then(self.serper.clone())
    }

    /// Register all sixteen travel tools on the given registry
    pub fn register_all(&self, registry: &mut ToolRegistry) -> agent_core::Result<()> {
        registry.register(SearchHotelsTool::new(self.hotels_chain()))?;
        registry.register(SearchAttractionsTool::new(self.attractions_chain()))?;
        registry.register(SearchFlightsTool::new(self.flights_chain()))?;
        registry.register(SearchRestaurantsTool::new(self.restaurants_chain()))?;
        registry.register(SearchTransportationTool::new(self.transportation_chain()))?;
        registry.register(CurrentWeatherTool::new(self.weather.clone()))?;
        registry.register(WeatherForecastTool::new(self.weather.clone()))?;
        registry.register(TripAllocationTool)?;
        registry.register(HotelCostTool)?;
        registry.register(AddCostsTool)?;
        registry.register(TotalExpenseTool)?;
        registry.register(DailyBudgetTool)?;
        registry.register(ConvertCurrencyTool::new(self.rates.clone()))?;
        registry.register(ExchangeRateTool::new(self.rates.clone()))?;
        registry.register(TripPlanTool::new(
            self.flights_chain(),
            self.hotels_chain(),
            self.weather.clone(),
        ))?;
        registry.register(DayPlanTool)?;
        Ok(())
    }

    /// Build a complete registry in one call
    pub fn build_registry(&self) -> agent_core::Result<ToolRegistry> {
        let mut registry = ToolRegistry::new();
        self.register_all(&mut registry)?;
        Ok(registry)
    }
}
