//! Settings structures for the HAI adapter configuration

use crate::results::ProviderKind;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main settings structure, mirrors settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub outgoing: OutgoingSettings,
    pub providers: ProvidersSettings,
    pub chat: ChatSettings,
    pub datasets: DatasetSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with environment variables
    ///
    /// Credentials are only ever taken from the environment or the
    /// settings file, never compiled in.
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("HAI_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("HAI_BIND_ADDRESS") {
            self.server.bind_address = val;
        }

        if let Some(key) = env_credential("BRAVE_API_KEY") {
            self.providers.brave.api_key = Some(key);
        }
        if let Some(key) = env_credential("BING_API_KEY") {
            self.providers.bing.api_key = Some(key);
        }
        if let Some(key) = env_credential("SERPER_API_KEY") {
            self.providers.serper.api_key = Some(key);
        }

        if let Ok(val) = std::env::var("HAI_BASE_URL") {
            self.chat.base_url = val;
        }
        if let Some(token) = env_credential("HAI_BEARER_TOKEN") {
            self.chat.bearer_token = Some(token);
        }
        if let Ok(val) = std::env::var("HAI_X_API_KEY") {
            self.chat.x_api_key = val;
        }
        if let Ok(val) = std::env::var("HAI_MODEL") {
            self.chat.model = val;
        }

        let employees = std::env::var("HAI_EMPLOYEES_PATH").or_else(|_| std::env::var("HAI_EXCEL_PATH"));
        if let Ok(val) = employees {
            self.datasets.employees_path = PathBuf::from(val);
        }
    }

    /// Reject values that would only fail once a request is in flight
    pub fn validate(&self) -> Result<()> {
        check_timeout("outgoing.request_timeout", self.outgoing.request_timeout)?;
        check_timeout("chat.timeout", self.chat.timeout)?;
        Ok(())
    }
}

fn check_timeout(name: &str, secs: f64) -> Result<Duration> {
    match Duration::try_from_secs_f64(secs) {
        Ok(d) if !d.is_zero() => Ok(d),
        _ => Err(anyhow!("{} must be a positive number of seconds, got {}", name, secs)),
    }
}

/// `secs` as a duration, or `fallback` seconds when it is not a usable value
fn timeout_or(secs: f64, fallback: u64) -> Duration {
    check_timeout("timeout", secs).unwrap_or_else(|_| Duration::from_secs(fallback))
}

/// Read a credential, treating blank values as absent
fn env_credential(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_address: "0.0.0.0".to_string(),
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Timeout for search provider requests in seconds
    pub request_timeout: f64,
    /// Pool max size
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Proxy settings
    pub proxies: ProxySettings,
    /// Extra headers to send with every request
    pub extra_headers: HashMap<String, String>,
}

impl OutgoingSettings {
    pub fn timeout(&self) -> Duration {
        timeout_or(self.request_timeout, crate::DEFAULT_TIMEOUT)
    }
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: crate::DEFAULT_TIMEOUT as f64,
            pool_maxsize: 20,
            verify_ssl: true,
            proxies: ProxySettings::default(),
            extra_headers: HashMap::new(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

/// Endpoint and credential for one search provider
#[derive(Debug, Clone, Serialize)]
pub struct ProviderConfig {
    /// Full endpoint URL
    pub base_url: String,
    /// API key, if the provider needs one
    pub api_key: Option<String>,
}

impl ProviderConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// The configured key, ignoring blank values
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

/// Search provider settings
///
/// Each provider entry may set either field; the other keeps its default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "ProvidersFile")]
pub struct ProvidersSettings {
    pub brave: ProviderConfig,
    pub bing: ProviderConfig,
    pub serper: ProviderConfig,
    pub duckduckgo: ProviderConfig,
}

impl ProvidersSettings {
    pub fn get(&self, kind: ProviderKind) -> &ProviderConfig {
        match kind {
            ProviderKind::Brave => &self.brave,
            ProviderKind::Bing => &self.bing,
            ProviderKind::Serper => &self.serper,
            ProviderKind::DuckduckgoHtml => &self.duckduckgo,
        }
    }
}

/// Provider entry as written in settings.yml
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProviderEntry {
    base_url: Option<String>,
    api_key: Option<String>,
}

impl ProviderEntry {
    fn over(self, mut config: ProviderConfig) -> ProviderConfig {
        if let Some(url) = self.base_url {
            config.base_url = url;
        }
        if self.api_key.is_some() {
            config.api_key = self.api_key;
        }
        config
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProvidersFile {
    brave: ProviderEntry,
    bing: ProviderEntry,
    serper: ProviderEntry,
    duckduckgo: ProviderEntry,
}

impl From<ProvidersFile> for ProvidersSettings {
    fn from(file: ProvidersFile) -> Self {
        let defaults = Self::default();
        Self {
            brave: file.brave.over(defaults.brave),
            bing: file.bing.over(defaults.bing),
            serper: file.serper.over(defaults.serper),
            duckduckgo: file.duckduckgo.over(defaults.duckduckgo),
        }
    }
}

impl Default for ProvidersSettings {
    fn default() -> Self {
        Self {
            brave: ProviderConfig::new("https://api.search.brave.com/res/v1/web/search"),
            bing: ProviderConfig::new("https://api.bing.microsoft.com/v7.0/search"),
            serper: ProviderConfig::new("https://google.serper.dev/search"),
            duckduckgo: ProviderConfig::new("https://html.duckduckgo.com/html/"),
        }
    }
}

/// LLM gateway settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatSettings {
    /// Gateway base URL; `/chat/completions` is appended
    pub base_url: String,
    pub bearer_token: Option<String>,
    /// Sent as `X-API-KEY`, even when empty
    pub x_api_key: String,
    /// Default model
    pub model: String,
    /// Default routing key
    pub client_to_use: String,
    /// Request timeout in seconds
    pub timeout: f64,
}

impl ChatSettings {
    pub fn timeout(&self) -> Duration {
        timeout_or(self.timeout, crate::CHAT_TIMEOUT)
    }
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            base_url: "https://mhai.hallym.or.kr/open-api".to_string(),
            bearer_token: None,
            x_api_key: String::new(),
            model: "Konan-LLM-ENT-11".to_string(),
            client_to_use: "konanllm".to_string(),
            timeout: crate::CHAT_TIMEOUT as f64,
        }
    }
}

/// Tabular dataset settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetSettings {
    /// JSON array of employee records
    pub employees_path: PathBuf,
    /// Rows kept from the employee file
    pub max_rows: usize,
}

impl Default for DatasetSettings {
    fn default() -> Self {
        Self {
            employees_path: PathBuf::from("data/employees.json"),
            max_rows: 7001,
        }
    }
}
