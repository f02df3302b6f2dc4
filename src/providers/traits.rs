//! Provider traits and types

use crate::error::SearchError;
use crate::network::HttpClient;
use crate::results::{ProviderKind, SearchResponse, SearchResultRow};
use crate::search::SearchQuery;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

/// HTTP request to be made by a provider
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    /// URL to request
    pub url: String,
    /// HTTP method
    pub method: HttpMethod,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Query parameters
    pub params: HashMap<String, String>,
    /// POST body data
    pub data: Option<RequestBody>,
}

impl ProviderRequest {
    /// Create a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self::with_method(url, HttpMethod::Get)
    }

    /// Create a POST request
    pub fn post(url: impl Into<String>) -> Self {
        Self::with_method(url, HttpMethod::Post)
    }

    fn with_method(url: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            url: url.into(),
            method,
            headers: HashMap::new(),
            params: HashMap::new(),
            data: None,
        }
    }

    /// Add a header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Add a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Add form data (sets content-type to form-urlencoded)
    pub fn form(mut self, data: HashMap<String, String>) -> Self {
        self.data = Some(RequestBody::Form(data));
        self
    }

    /// Add JSON body
    pub fn json(mut self, data: Value) -> Self {
        self.data = Some(RequestBody::Json(data));
        self
    }
}

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// Request body types
#[derive(Debug, Clone)]
pub enum RequestBody {
    Form(HashMap<String, String>),
    Json(Value),
}

/// HTTP response from a provider request
#[derive(Debug)]
pub struct ProviderResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub text: String,
    /// Response URL (after redirects)
    pub url: String,
}

impl ProviderResponse {
    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse response as JSON, reporting failures against `provider`
    pub fn json(&self, provider: &'static str) -> Result<Value, SearchError> {
        serde_json::from_str(&self.text).map_err(|e| SearchError::InvalidResponse {
            provider,
            message: e.to_string(),
        })
    }
}

/// String field of a JSON object, empty when missing or not a string
pub(crate) fn str_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Array nested under `path`, empty when any step is missing
pub(crate) fn nested_array<'a>(value: &'a Value, path: &[&str]) -> &'a [Value] {
    path.iter()
        .try_fold(value, |v, key| v.get(*key))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// A web search backend that normalizes its results into `SearchResultRow`s
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Provider identity
    fn kind(&self) -> ProviderKind;

    /// Provider name as reported in responses and logs
    fn name(&self) -> &'static str {
        self.kind().as_str()
    }

    /// Build the HTTP request for a search
    fn request(&self, query: &SearchQuery) -> Result<ProviderRequest, SearchError>;

    /// Parse a successful HTTP response into at most `count` rows
    fn response(
        &self,
        response: ProviderResponse,
        count: usize,
    ) -> Result<Vec<SearchResultRow>, SearchError>;

    /// Run one search against this provider
    async fn search(
        &self,
        client: &HttpClient,
        query: &SearchQuery,
    ) -> Result<SearchResponse, SearchError> {
        let request = self.request(query)?;

        let response = client
            .execute(request)
            .await
            .map_err(|source| SearchError::Network {
                provider: self.name(),
                source,
            })?;

        if !response.is_success() {
            return Err(SearchError::Upstream {
                provider: self.name(),
                status: response.status,
                body: response.text,
            });
        }

        let rows = self.response(response, query.count)?;
        Ok(SearchResponse::new(self.kind(), query.query.clone(), rows))
    }
}
