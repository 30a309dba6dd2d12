//! HTTP Search Providers
//!
//! Thin request/parse wrappers over the external search APIs. Each provider
//! formats a handful of result lines; quality filtering happens in the
//! chain resolver, not here.

use async_trait::async_trait;
use serde::Deserialize;

use super::SearchProvider;
use crate::error::{PlannerError, Result};

/// Google Places text search
pub struct GooglePlacesSearch {
    client: reqwest::Client,
    api_key: String,
}

impl GooglePlacesSearch {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
        }
    }
}

#[derive(Deserialize)]
struct PlacesResponse {
    #[serde(default)]
    results: Vec<PlaceEntry>,
}

#[derive(Deserialize)]
struct PlaceEntry {
    name: String,
    #[serde(default)]
    formatted_address: Option<String>,
    #[serde(default)]
    rating: Option<f64>,
}

#[async_trait]
impl SearchProvider for GooglePlacesSearch {
    fn name(&self) -> &str {
        "google-places"
    }

    async fn fetch(&self, query: &str) -> Result<String> {
        let response: PlacesResponse = self
            .client
            .get("https://maps.googleapis.com/maps/api/place/textsearch/json")
            .query(&[("query", query), ("key", &self.api_key)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let lines: Vec<String> = response
            .results
            .iter()
            .take(8)
            .map(|p| {
                let rating = p
                    .rating
                    .map(|r| format!(" (rating {r:.1})"))
                    .unwrap_or_default();
                let address = p.formatted_address.as_deref().unwrap_or("address unknown");
                format!("{}{} - {}", p.name, rating, address)
            })
            .collect();

        Ok(lines.join("\n"))
    }
}

/// SerpAPI Google search
pub struct SerpApiSearch {
    client: reqwest::Client,
    api_key: String,
}

impl SerpApiSearch {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
        }
    }
}

#[derive(Deserialize)]
struct SerpResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
}

#[derive(Deserialize)]
struct OrganicResult {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    snippet: Option<String>,
}

#[async_trait]
impl SearchProvider for SerpApiSearch {
    fn name(&self) -> &str {
        "serpapi"
    }

    async fn fetch(&self, query: &str) -> Result<String> {
        let response: SerpResponse = self
            .client
            .get("https://serpapi.com/search.json")
            .query(&[("engine", "google"), ("q", query), ("api_key", &self.api_key)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(join_organic(&response.organic_results))
    }
}

/// Serper Google search
pub struct SerperSearch {
    client: reqwest::Client,
    api_key: String,
}

impl SerperSearch {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
        }
    }
}

#[derive(Deserialize)]
struct SerperResponse {
    #[serde(default)]
    organic: Vec<OrganicResult>,
}

#[async_trait]
impl SearchProvider for SerperSearch {
    fn name(&self) -> &str {
        "serper"
    }

    async fn fetch(&self, query: &str) -> Result<String> {
        let response: SerperResponse = self
            .client
            .post("https://google.serper.dev/search")
            .header("X-API-KEY", &self.api_key)
            .json(&serde_json::json!({ "q": query }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(join_organic(&response.organic))
    }
}

/// DuckDuckGo instant-answer lookup. Keyless, used as the terminal provider
/// in every chain.
pub struct DuckDuckGoSearch {
    client: reqwest::Client,
}

impl Default for DuckDuckGoSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl DuckDuckGoSearch {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Deserialize)]
struct DdgResponse {
    #[serde(rename = "AbstractText", default)]
    abstract_text: String,
    #[serde(rename = "RelatedTopics", default)]
    related_topics: Vec<DdgTopic>,
}

#[derive(Deserialize)]
struct DdgTopic {
    #[serde(rename = "Text", default)]
    text: Option<String>,
}

#[async_trait]
impl SearchProvider for DuckDuckGoSearch {
    fn name(&self) -> &str {
        "duckduckgo"
    }

    async fn fetch(&self, query: &str) -> Result<String> {
        let response: DdgResponse = self
            .client
            .get("https://api.duckduckgo.com/")
            .query(&[("q", query), ("format", "json"), ("no_html", "1")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let mut lines = Vec::new();
        if !response.abstract_text.is_empty() {
            lines.push(response.abstract_text);
        }
        lines.extend(
            response
                .related_topics
                .into_iter()
                .filter_map(|t| t.text)
                .take(8),
        );

        if lines.is_empty() {
            return Err(PlannerError::Search(format!(
                "no results for query: {query}"
            )));
        }

        Ok(lines.join("\n"))
    }
}

fn join_organic(results: &[OrganicResult]) -> String {
    results
        .iter()
        .take(8)
        .filter_map(|r| match (&r.title, &r.snippet) {
            (Some(title), Some(snippet)) => Some(format!("{title}: {snippet}")),
            (Some(title), None) => Some(title.clone()),
            (None, Some(snippet)) => Some(snippet.clone()),
            (None, None) => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}
