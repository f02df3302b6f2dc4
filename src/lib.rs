//! HAI adapter: a JSON-RPC gateway for an in-house LLM assistant
//!
//! One endpoint serves small tabular datasets (with Korean person-name
//! lookups), proxies chat completions to the LLM gateway, and aggregates
//! web search across several providers with an ordered fallback chain.

pub mod chat;
pub mod config;
pub mod datasets;
pub mod error;
pub mod names;
pub mod network;
pub mod providers;
pub mod results;
pub mod rpc;
pub mod search;
pub mod web;

pub use config::Settings;
pub use error::SearchError;
pub use results::{ProviderKind, SearchResponse, SearchResultRow};
pub use search::{Search, SearchQuery};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Rows requested from a provider when the caller does not say
pub const DEFAULT_COUNT: usize = 10;

/// Default timeout for search requests in seconds
pub const DEFAULT_TIMEOUT: u64 = 12;

/// Timeout for chat completions in seconds
pub const CHAT_TIMEOUT: u64 = 30;
