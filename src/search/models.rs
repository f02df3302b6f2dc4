//! Search query and related data models

use crate::results::ProviderKind;
use serde::{Deserialize, Serialize};

/// Which provider(s) a search may use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProviderSelection {
    /// Walk the fallback chain until one provider answers
    #[default]
    Auto,
    /// Call exactly this provider, no fallback
    Single(ProviderKind),
}

impl ProviderSelection {
    /// Parse a caller-supplied provider name.
    ///
    /// Blank and unrecognised names select `Auto`.
    pub fn parse(name: Option<&str>) -> Self {
        match name.map(str::trim).filter(|n| !n.is_empty()) {
            None => Self::Auto,
            Some(n) if n.eq_ignore_ascii_case("auto") => Self::Auto,
            Some(n) => match ProviderKind::from_name(n) {
                Some(kind) => Self::Single(kind),
                None => {
                    tracing::warn!("Unknown provider '{}', using auto fallback", n);
                    Self::Auto
                }
            },
        }
    }
}

/// Provider-specific knobs passed through from the caller.
///
/// Each provider applies its own default for options left unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    pub safesearch: Option<String>,
    /// Market code (Bing)
    pub mkt: Option<String>,
    /// Country (Serper)
    pub gl: Option<String>,
    /// Interface language (Serper)
    pub hl: Option<String>,
}

/// A web search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// The search query string
    pub query: String,
    pub selection: ProviderSelection,
    /// Upper bound on returned rows
    pub count: usize,
    pub options: SearchOptions,
}

impl SearchQuery {
    /// Create an `auto` query with the default row count
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            selection: ProviderSelection::Auto,
            count: crate::DEFAULT_COUNT,
            options: SearchOptions::default(),
        }
    }

    pub fn with_selection(mut self, selection: ProviderSelection) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_parsing() {
        assert_eq!(ProviderSelection::parse(None), ProviderSelection::Auto);
        assert_eq!(ProviderSelection::parse(Some("  ")), ProviderSelection::Auto);
        assert_eq!(ProviderSelection::parse(Some("AUTO")), ProviderSelection::Auto);
        assert_eq!(
            ProviderSelection::parse(Some("Bing")),
            ProviderSelection::Single(ProviderKind::Bing)
        );
        assert_eq!(
            ProviderSelection::parse(Some("ddg")),
            ProviderSelection::Single(ProviderKind::DuckduckgoHtml)
        );
        assert_eq!(ProviderSelection::parse(Some("yahoo")), ProviderSelection::Auto);
    }

    #[test]
    fn test_query_defaults() {
        let query = SearchQuery::new("rust");
        assert_eq!(query.count, 10);
        assert_eq!(query.selection, ProviderSelection::Auto);
        assert!(query.options.safesearch.is_none());
    }
}
