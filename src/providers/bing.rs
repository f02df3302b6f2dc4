//! Bing Web Search API provider

use super::traits::*;
use crate::config::ProviderConfig;
use crate::error::SearchError;
use crate::results::{ProviderKind, SearchResultRow};
use crate::search::SearchQuery;

/// Bing web search (keyed REST API, v7)
pub struct Bing {
    base_url: String,
    api_key: Option<String>,
}

impl Bing {
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            api_key: config.credential().map(str::to_string),
        }
    }
}

impl SearchProvider for Bing {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Bing
    }

    fn request(&self, query: &SearchQuery) -> Result<ProviderRequest, SearchError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(SearchError::MissingCredential {
                provider: self.name(),
                env_var: "BING_API_KEY",
            })?;

        let mkt = query.options.mkt.as_deref().unwrap_or("ko-KR");
        let safesearch = query.options.safesearch.as_deref().unwrap_or("Moderate");

        Ok(ProviderRequest::get(&self.base_url)
            .header("Ocp-Apim-Subscription-Key", api_key)
            .param("q", &query.query)
            .param("count", query.count.to_string())
            .param("mkt", mkt)
            .param("safeSearch", safesearch))
    }

    fn response(
        &self,
        response: ProviderResponse,
        count: usize,
    ) -> Result<Vec<SearchResultRow>, SearchError> {
        let json = response.json(self.name())?;

        let rows = nested_array(&json, &["webPages", "value"])
            .iter()
            .take(count)
            .map(|item| {
                SearchResultRow::new(str_field(item, "name"), str_field(item, "url"))
                    .with_snippet(str_field(item, "snippet"))
                    .with_source(str_field(item, "displayUrl"))
            })
            .collect();

        Ok(rows)
    }
}
