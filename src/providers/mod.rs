//! Search provider module
//!
//! Defines the `SearchProvider` trait and the four adapters behind it:
//! two keyed REST APIs (Brave, Bing), one keyed POST-JSON API (Serper) and
//! the unauthenticated DuckDuckGo HTML scraper.

mod registry;
mod traits;

pub mod bing;
pub mod brave;
pub mod duckduckgo;
pub mod serper;

#[cfg(test)]
pub(crate) mod testing;

pub use registry::ProviderRegistry;
pub use traits::*;
