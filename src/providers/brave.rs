//! Brave Search API provider

use super::traits::*;
use crate::config::ProviderConfig;
use crate::error::SearchError;
use crate::network::accept_json;
use crate::results::{ProviderKind, SearchResultRow};
use crate::search::SearchQuery;

/// Brave web search (keyed REST API)
pub struct Brave {
    base_url: String,
    api_key: Option<String>,
}

impl Brave {
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            api_key: config.credential().map(str::to_string),
        }
    }
}

impl SearchProvider for Brave {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Brave
    }

    fn request(&self, query: &SearchQuery) -> Result<ProviderRequest, SearchError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(SearchError::MissingCredential {
                provider: self.name(),
                env_var: "BRAVE_API_KEY",
            })?;

        let safesearch = query.options.safesearch.as_deref().unwrap_or("moderate");

        Ok(ProviderRequest::get(&self.base_url)
            .header("Accept", accept_json())
            .header("X-Subscription-Token", api_key)
            .param("q", &query.query)
            .param("count", query.count.to_string())
            .param("safesearch", safesearch))
    }

    fn response(
        &self,
        response: ProviderResponse,
        count: usize,
    ) -> Result<Vec<SearchResultRow>, SearchError> {
        let json = response.json(self.name())?;

        let rows = nested_array(&json, &["web", "results"])
            .iter()
            .take(count)
            .map(|item| {
                let host = item
                    .get("meta_url")
                    .map(|meta| str_field(meta, "host"))
                    .unwrap_or_default();
                SearchResultRow::new(str_field(item, "title"), str_field(item, "url"))
                    .with_snippet(str_field(item, "description"))
                    .with_source(host)
            })
            .collect();

        Ok(rows)
    }
}
