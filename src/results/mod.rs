//! Result types for web search
//!
//! Every provider normalizes its payload into `SearchResultRow`s wrapped in a
//! `SearchResponse`.

mod types;

pub use types::*;
