//! Result type definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Search providers known to the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Brave,
    Bing,
    Serper,
    DuckduckgoHtml,
}

impl ProviderKind {
    /// Fallback priority used by `auto` mode: paid structured APIs first,
    /// free scraping last.
    pub const FALLBACK_ORDER: [ProviderKind; 4] = [
        ProviderKind::Brave,
        ProviderKind::Bing,
        ProviderKind::Serper,
        ProviderKind::DuckduckgoHtml,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Brave => "brave",
            Self::Bing => "bing",
            Self::Serper => "serper",
            Self::DuckduckgoHtml => "duckduckgo_html",
        }
    }

    /// Resolve a caller-supplied provider name, case-insensitively
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "brave" => Some(Self::Brave),
            "bing" => Some(Self::Bing),
            "serper" => Some(Self::Serper),
            "ddg" | "duckduckgo" | "duckduckgo_html" => Some(Self::DuckduckgoHtml),
            _ => None,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One normalized search hit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultRow {
    pub title: String,
    pub link: String,
    pub snippet: String,
    /// Origin label, usually a domain
    pub source: String,
}

impl SearchResultRow {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            ..Default::default()
        }
    }

    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = snippet.into();
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }
}

/// Rows returned by exactly one provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub provider: ProviderKind,
    #[serde(rename = "q")]
    pub query: String,
    pub rows: Vec<SearchResultRow>,
    pub matched: usize,
}

impl SearchResponse {
    /// Build a response; `matched` always mirrors `rows.len()`
    pub fn new(provider: ProviderKind, query: impl Into<String>, rows: Vec<SearchResultRow>) -> Self {
        let matched = rows.len();
        Self {
            provider,
            query: query.into(),
            rows,
            matched,
        }
    }
}
