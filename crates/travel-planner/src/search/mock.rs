//! Mock Search Providers
//!
//! For testing and demo purposes, mirroring the shape of real results.

use async_trait::async_trait;

use super::SearchProvider;
use crate::error::{PlannerError, Result};

/// Provider that always returns the same response (or the same error)
pub struct StaticSearchProvider {
    name: String,
    response: std::result::Result<String, String>,
}

impl StaticSearchProvider {
    pub fn ok(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            response: Ok(text.into()),
        }
    }

    pub fn failing(name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            response: Err(error.into()),
        }
    }
}

#[async_trait]
impl SearchProvider for StaticSearchProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, _query: &str) -> Result<String> {
        self.response
            .clone()
            .map_err(PlannerError::Search)
    }
}

/// Keyword-routed canned results with realistic travel content.
///
/// Lets the full agent run offline: the returned text is long enough to
/// clear the chain quality bar and mentions the things an itinerary needs.
#[derive(Default)]
pub struct CannedSearch;

impl CannedSearch {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SearchProvider for CannedSearch {
    fn name(&self) -> &str {
        "canned"
    }

    async fn fetch(&self, query: &str) -> Result<String> {
        let q = query.to_lowercase();

        let text = if q.contains("hotel") || q.contains("accommodation") {
            "Hotel Le Centre (rating 4.5) - 12 Rue Principale, doubles from $140/night, rooftop view.\n\
             Grand Plaza Hotel (rating 4.2) - Old Town, from $110/night, breakfast included.\n\
             Riverside Boutique Stay (rating 4.7) - riverside district, from $165/night."
        } else if q.contains("flight") {
            "Nonstop flights available daily, economy from $420 round trip on the national carrier, \
             departing 09:40 and 18:15. One-stop options from $310 with a 2h layover."
        } else if q.contains("restaurant") || q.contains("food") {
            "Chez Marie - classic bistro, mains $18-30, booked out on weekends.\n\
             The Spice Route - regional cuisine, tasting menu $45.\n\
             Canal House Cafe - brunch and coffee, budget friendly."
        } else if q.contains("transport") || q.contains("metro") {
            "Metro day pass $8, airport express every 15 minutes ($12), ride-hailing widely \
             available, historic center easily walkable. Taxis metered from $4 base fare."
        } else if q.contains("attraction") || q.contains("things to do") {
            "City Art Museum, Cathedral Quarter, Botanical Gardens, Old Harbour walking route, \
             Observation Tower, Night Market. Museum entry around $15, gardens free."
        } else {
            "General travel information: the city is busiest June to August; book stays early. \
             Most museums close Mondays and card payment is accepted nearly everywhere."
        };

        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_canned_results_clear_quality_bar() {
        let canned = CannedSearch::new();
        for query in [
            "best hotels to stay in Paris",
            "flights from Delhi to Paris",
            "best restaurants and food places to eat in Paris",
            "transportation options in Paris",
            "top attractions, activities, and things to do in Paris",
        ] {
            let text = canned.fetch(query).await.unwrap();
            assert!(text.len() > super::super::MIN_ACCEPTABLE_LEN);
        }
    }
}
