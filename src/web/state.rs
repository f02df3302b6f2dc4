//! Application state shared across handlers

use crate::chat::ChatClient;
use crate::config::Settings;
use crate::datasets::DatasetRegistry;
use crate::network::HttpClient;
use crate::providers::ProviderRegistry;
use crate::rpc::Dispatcher;
use crate::search::Search;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Method router for the JSON-RPC endpoint
    pub dispatcher: Arc<Dispatcher>,
}

impl AppState {
    /// Wire the search chain, datasets and chat client from settings
    pub fn new(settings: &Settings, client: HttpClient) -> Self {
        let providers = ProviderRegistry::from_settings(&settings.providers);
        let search = Arc::new(Search::new(client.clone(), providers));
        let datasets = DatasetRegistry::from_settings(&settings.datasets);
        let chat = Arc::new(ChatClient::new(client, settings.chat.clone()));

        Self::with_dispatcher(Dispatcher::new(search, datasets, chat))
    }

    /// State around a prebuilt dispatcher
    pub fn with_dispatcher(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
        }
    }
}
