//! HTTP networking module
//!
//! Provides the HTTP client shared by the search providers and the chat proxy.

mod client;
mod user_agent;

pub use client::HttpClient;
pub use user_agent::{accept_html, accept_json, generate_user_agent};
