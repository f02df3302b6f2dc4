//! Provider registry holding the ordered fallback chain

use super::traits::SearchProvider;
use super::{bing, brave, duckduckgo, serper};
use crate::config::ProvidersSettings;
use crate::results::ProviderKind;
use std::sync::Arc;
use tracing::info;

/// Registered providers, in fallback priority order
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn SearchProvider>>,
}

impl ProviderRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the standard chain in `ProviderKind::FALLBACK_ORDER`
    pub fn from_settings(settings: &ProvidersSettings) -> Self {
        let mut registry = Self::new();

        for kind in ProviderKind::FALLBACK_ORDER {
            let config = settings.get(kind);
            let provider: Arc<dyn SearchProvider> = match kind {
                ProviderKind::Brave => Arc::new(brave::Brave::new(config)),
                ProviderKind::Bing => Arc::new(bing::Bing::new(config)),
                ProviderKind::Serper => Arc::new(serper::Serper::new(config)),
                ProviderKind::DuckduckgoHtml => Arc::new(duckduckgo::DuckDuckGo::new(config)),
            };

            if kind != ProviderKind::DuckduckgoHtml && config.credential().is_none() {
                info!("Provider {} has no API key and will be skipped in auto mode", kind);
            }
            registry.register(provider);
        }

        registry
    }

    /// Append a provider to the end of the chain.
    ///
    /// A provider of an already registered kind replaces the old one in place.
    pub fn register(&mut self, provider: Arc<dyn SearchProvider>) {
        let kind = provider.kind();
        match self.providers.iter_mut().find(|p| p.kind() == kind) {
            Some(slot) => *slot = provider,
            None => self.providers.push(provider),
        }
    }

    /// Get a provider by identity
    pub fn get(&self, kind: ProviderKind) -> Option<&Arc<dyn SearchProvider>> {
        self.providers.iter().find(|p| p.kind() == kind)
    }

    /// Providers in the order `auto` mode tries them
    pub fn chain(&self) -> &[Arc<dyn SearchProvider>] {
        &self.providers
    }

    /// Get all provider names, in chain order
    pub fn names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Get number of registered providers
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
