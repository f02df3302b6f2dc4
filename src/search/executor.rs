//! Search execution: single-provider calls and the `auto` fallback chain

use super::models::{ProviderSelection, SearchQuery};
use crate::error::SearchError;
use crate::network::HttpClient;
use crate::providers::ProviderRegistry;
use crate::results::SearchResponse;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Search executor that picks one provider, or walks the fallback chain
pub struct Search {
    /// HTTP client for making requests
    client: HttpClient,
    /// Providers in fallback order
    registry: ProviderRegistry,
}

impl Search {
    /// Create a new search executor
    pub fn new(client: HttpClient, registry: ProviderRegistry) -> Self {
        Self { client, registry }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Execute a web search.
    ///
    /// Rows always come from exactly one provider. In `auto` mode the first
    /// provider that answers wins, even with zero rows; if every provider
    /// fails, the error of the last one is returned.
    pub async fn execute(&self, query: &SearchQuery) -> Result<SearchResponse, SearchError> {
        match query.selection {
            ProviderSelection::Single(kind) => match self.registry.get(kind) {
                Some(provider) => {
                    info!("Searching '{}' with {}", query.query, kind);
                    provider.search(&self.client, query).await
                }
                None => {
                    warn!("Provider {} is not registered, using auto fallback", kind);
                    self.execute_auto(query).await
                }
            },
            ProviderSelection::Auto => self.execute_auto(query).await,
        }
    }

    async fn execute_auto(&self, query: &SearchQuery) -> Result<SearchResponse, SearchError> {
        let chain = self.registry.chain();
        info!("Searching '{}' across {} providers", query.query, chain.len());

        let Some((last, fallbacks)) = chain.split_last() else {
            return Err(SearchError::NoProviders);
        };

        for provider in fallbacks {
            let start = Instant::now();
            match provider.search(&self.client, query).await {
                Ok(response) => {
                    debug!(
                        "Provider {} returned {} rows in {:?}",
                        provider.name(),
                        response.matched,
                        start.elapsed()
                    );
                    return Ok(response);
                }
                Err(e) => warn!("Provider {} failed, trying next: {}", provider.name(), e),
            }
        }

        // No further fallback: the last provider's failure is the result
        last.search(&self.client, query).await
    }
}
