//! Search Providers & Fallback Resolution
//!
//! Every search-backed tool resolves its query through an ordered chain of
//! providers. The first response that clears the quality bar wins; the
//! terminal provider is a generic web search assumed always available, and
//! its failure is the one unrecoverable case per tool call.

mod http;
mod mock;

pub use http::{DuckDuckGoSearch, GooglePlacesSearch, SerpApiSearch, SerperSearch};
pub use mock::{CannedSearch, StaticSearchProvider};

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;

/// Minimum response length for a provider result to be accepted.
pub const MIN_ACCEPTABLE_LEN: usize = 50;

/// One backing data source for a search tool.
///
/// Opaque capability: query string in, text out. Failures surface as
/// errors or short text, never as typed payloads the caller must unpack.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Provider name (for logging and result labelling)
    fn name(&self) -> &str;

    /// Fetch results for a free-text query
    async fn fetch(&self, query: &str) -> Result<String>;
}

/// An accepted chain response, tagged with the provider that produced it
#[derive(Clone, Debug)]
pub struct ChainHit {
    pub provider: String,
    pub text: String,
}

/// Ordered fallback chain of search providers.
///
/// Order is fixed at construction and represents priority. Providers that
/// fail or return thin results are skipped silently; only the last-resort
/// provider's failure propagates.
#[derive(Clone)]
pub struct ProviderChain {
    providers: Vec<Arc<dyn SearchProvider>>,
    last_resort: Arc<dyn SearchProvider>,
}

impl ProviderChain {
    pub fn new(last_resort: Arc<dyn SearchProvider>) -> Self {
        Self {
            providers: Vec::new(),
            last_resort,
        }
    }

    /// Append a provider; `None` (a disabled provider) is skipped.
    pub fn then(mut self, provider: Option<Arc<dyn SearchProvider>>) -> Self {
        if let Some(provider) = provider {
            self.providers.push(provider);
        }
        self
    }

    /// Number of providers ahead of the last resort
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Try providers in priority order, accepting the first response that is
    /// non-empty and longer than [`MIN_ACCEPTABLE_LEN`]. No partial-content
    /// merging happens between providers.
    pub async fn resolve(&self, query: &str) -> Result<ChainHit> {
        for provider in &self.providers {
            match provider.fetch(query).await {
                Ok(text) if text.trim().len() > MIN_ACCEPTABLE_LEN => {
                    tracing::debug!(provider = provider.name(), "chain hit");
                    return Ok(ChainHit {
                        provider: provider.name().to_string(),
                        text,
                    });
                }
                Ok(_) => {
                    tracing::debug!(provider = provider.name(), "response too thin, skipping");
                }
                Err(e) => {
                    tracing::debug!(provider = provider.name(), error = %e, "provider failed, skipping");
                }
            }
        }

        // Last resort: no further fallback, errors propagate.
        let text = self.last_resort.fetch(query).await?;
        Ok(ChainHit {
            provider: self.last_resort.name().to_string(),
            text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arc(p: StaticSearchProvider) -> Arc<dyn SearchProvider> {
        Arc::new(p)
    }

    #[tokio::test]
    async fn test_thin_response_falls_through() {
        let chain = ProviderChain::new(arc(StaticSearchProvider::ok("fallback", &"z".repeat(80))))
            .then(Some(arc(StaticSearchProvider::ok("thin", "only 10ch"))))
            .then(Some(arc(StaticSearchProvider::ok("rich", &"x".repeat(200)))));

        let hit = chain.resolve("hotels in Paris").await.unwrap();
        assert_eq!(hit.provider, "rich");
        assert_eq!(hit.text.len(), 200);
    }

    #[tokio::test]
    async fn test_failing_provider_is_skipped() {
        let chain = ProviderChain::new(arc(StaticSearchProvider::ok("fallback", &"z".repeat(80))))
            .then(Some(arc(StaticSearchProvider::failing("down", "timeout"))));

        let hit = chain.resolve("anything").await.unwrap();
        assert_eq!(hit.provider, "fallback");
    }

    #[tokio::test]
    async fn test_last_resort_failure_propagates() {
        let chain = ProviderChain::new(arc(StaticSearchProvider::failing("fallback", "offline")))
            .then(Some(arc(StaticSearchProvider::ok("thin", "short"))));

        assert!(chain.resolve("anything").await.is_err());
    }

    #[tokio::test]
    async fn test_disabled_providers_are_not_in_chain() {
        let chain = ProviderChain::new(arc(StaticSearchProvider::ok("fallback", &"z".repeat(80))))
            .then(None)
            .then(None);

        assert!(chain.is_empty());
        let hit = chain.resolve("anything").await.unwrap();
        assert_eq!(hit.provider, "fallback");
    }
}
