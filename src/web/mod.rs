//! Web server module
//!
//! Exposes the JSON-RPC endpoint and a health probe over HTTP.

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
