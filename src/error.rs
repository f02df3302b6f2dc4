//! Error types shared by the search providers and the aggregator

use thiserror::Error;

/// Failure of a single search provider call
#[derive(Debug, Error)]
pub enum SearchError {
    /// Required API key is not configured
    #[error("{provider}: missing credential {env_var}")]
    MissingCredential {
        provider: &'static str,
        env_var: &'static str,
    },

    /// Provider answered with a non-2xx status
    #[error("{provider}: HTTP {status}")]
    Upstream {
        provider: &'static str,
        status: u16,
        body: String,
    },

    /// Provider answered 2xx but the body could not be understood
    #[error("{provider}: invalid response: {message}")]
    InvalidResponse {
        provider: &'static str,
        message: String,
    },

    /// Transport failure, including timeouts
    #[error("{provider}: request failed: {source}")]
    Network {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The fallback chain is empty
    #[error("no search providers registered")]
    NoProviders,
}

impl SearchError {
    /// Name of the provider that failed
    pub fn provider(&self) -> &'static str {
        match self {
            Self::MissingCredential { provider, .. }
            | Self::Upstream { provider, .. }
            | Self::InvalidResponse { provider, .. }
            | Self::Network { provider, .. } => provider,
            Self::NoProviders => "auto",
        }
    }

    /// Whether the failure came from the remote side rather than from us
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream { .. } | Self::InvalidResponse { .. })
    }

    /// Body or message worth echoing back to the caller
    pub fn upstream_detail(&self) -> Option<&str> {
        match self {
            Self::Upstream { body, .. } => Some(body),
            Self::InvalidResponse { message, .. } => Some(message),
            _ => None,
        }
    }
}
