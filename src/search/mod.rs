//! Search orchestration module
//!
//! Routes a query to one provider, or walks the provider fallback chain.

mod executor;
mod models;

pub use executor::Search;
pub use models::*;
