//! Network-free provider for tests

use super::{ProviderRequest, ProviderResponse, SearchProvider};
use crate::error::SearchError;
use crate::network::HttpClient;
use crate::results::{ProviderKind, SearchResponse, SearchResultRow};
use crate::search::SearchQuery;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

enum Outcome {
    Rows(usize),
    Status(u16),
    NoKey,
}

/// Provider that answers without touching the network
pub struct Stub {
    kind: ProviderKind,
    outcome: Outcome,
    calls: AtomicUsize,
}

impl Stub {
    fn with(kind: ProviderKind, outcome: Outcome) -> Arc<Self> {
        Arc::new(Self {
            kind,
            outcome,
            calls: AtomicUsize::new(0),
        })
    }

    /// Answers with `rows` rows (bounded by the query count)
    pub fn ok(kind: ProviderKind, rows: usize) -> Arc<Self> {
        Self::with(kind, Outcome::Rows(rows))
    }

    /// Fails with an upstream HTTP status
    pub fn failing(kind: ProviderKind, status: u16) -> Arc<Self> {
        Self::with(kind, Outcome::Status(status))
    }

    /// Fails as if no API key were configured
    pub fn unconfigured(kind: ProviderKind) -> Arc<Self> {
        Self::with(kind, Outcome::NoKey)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchProvider for Stub {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    fn request(&self, _query: &SearchQuery) -> Result<ProviderRequest, SearchError> {
        Ok(ProviderRequest::get("http://unused"))
    }

    fn response(
        &self,
        _response: ProviderResponse,
        _count: usize,
    ) -> Result<Vec<SearchResultRow>, SearchError> {
        Ok(Vec::new())
    }

    async fn search(
        &self,
        _client: &HttpClient,
        query: &SearchQuery,
    ) -> Result<SearchResponse, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.outcome {
            Outcome::Rows(n) => {
                let rows = (0..n)
                    .take(query.count)
                    .map(|i| SearchResultRow::new(format!("r{i}"), format!("https://{}/{i}", self.kind)))
                    .collect();
                Ok(SearchResponse::new(self.kind, query.query.clone(), rows))
            }
            Outcome::Status(status) => Err(SearchError::Upstream {
                provider: self.kind.as_str(),
                status,
                body: format!("{} down", self.kind),
            }),
            Outcome::NoKey => Err(SearchError::MissingCredential {
                provider: self.kind.as_str(),
                env_var: "STUB_API_KEY",
            }),
        }
    }
}
