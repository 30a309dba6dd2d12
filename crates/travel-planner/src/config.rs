//! Planner Configuration
//!
//! API keys and endpoints are carried in an explicit structure passed into
//! the provider constructors. A missing key disables that provider, which
//! then simply does not appear in the fallback chains.

/// Configuration for all external data providers
#[derive(Clone, Debug, Default)]
pub struct PlannerConfig {
    /// Google Places API key (hotel/restaurant/attraction lookups)
    pub google_places_key: Option<String>,

    /// SerpAPI key (Google search results)
    pub serpapi_key: Option<String>,

    /// Serper key (Google search results, alternative)
    pub serper_key: Option<String>,

    /// OpenWeather API key
    pub openweather_key: Option<String>,

    /// OpenWeather base URL override
    pub weather_base_url: Option<String>,

    /// Exchange-rate API base URL override
    pub currency_base_url: Option<String>,
}

impl PlannerConfig {
    /// Read keys from the process environment. Absent variables leave the
    /// matching provider disabled.
    pub fn from_env() -> Self {
        Self {
            google_places_key: non_empty_var("GOOGLE_PLACES_API_KEY"),
            serpapi_key: non_empty_var("SERPAPI_KEY"),
            serper_key: non_empty_var("SERPER_API_KEY"),
            openweather_key: non_empty_var("OPENWEATHER_API_KEY"),
            weather_base_url: non_empty_var("OPENWEATHER_BASE_URL"),
            currency_base_url: non_empty_var("CURRENCY_BASE_URL"),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_no_keys() {
        let config = PlannerConfig::default();
        assert!(config.google_places_key.is_none());
        assert!(config.serpapi_key.is_none());
        assert!(config.serper_key.is_none());
        assert!(config.openweather_key.is_none());
    }
}
