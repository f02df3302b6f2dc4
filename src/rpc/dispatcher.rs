//! Method routing for the JSON-RPC endpoint

use super::params;
use super::{RpcError, RpcRequest, RpcResponse};
use crate::chat::{ChatClient, ChatError, ChatRequest};
use crate::datasets::{self, DatasetError, DatasetRegistry, TabularRecord};
use crate::error::SearchError;
use crate::names::extract_person_names;
use crate::search::{ProviderSelection, Search, SearchOptions, SearchQuery};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::{debug, warn};

/// Every method the endpoint answers to, in discovery order
pub const METHODS: &[&str] = &[
    "list_methods",
    "list_resources",
    "read_resource",
    "query_resource",
    "web_search",
    "call_tool",
];

type RpcResult = Result<Value, RpcError>;

/// Routes one request to its handler.
///
/// Holds no per-request state; everything it owns is read-only after
/// construction, so one instance serves all connections.
pub struct Dispatcher {
    search: Arc<Search>,
    datasets: DatasetRegistry,
    chat: Arc<ChatClient>,
}

impl Dispatcher {
    pub fn new(search: Arc<Search>, datasets: DatasetRegistry, chat: Arc<ChatClient>) -> Self {
        Self {
            search,
            datasets,
            chat,
        }
    }

    pub fn search(&self) -> &Search {
        &self.search
    }

    /// Handle a request. Always yields an envelope, never panics on input.
    pub async fn dispatch(&self, request: RpcRequest) -> RpcResponse {
        let params = request.params_object();
        let method = request.method.as_deref().unwrap_or_default();
        debug!("Dispatching '{}'", method);

        let result = match method {
            "list_methods" => Ok(json!({ "methods": METHODS })),
            "list_resources" => Ok(self.list_resources()),
            "read_resource" => self.read_resource(&params),
            "query_resource" => self.query_resource(&params),
            "web_search" => self.web_search(&params, "web_search").await,
            "call_tool" => self.call_tool(&params).await,
            _ => Err(RpcError::method_not_found()),
        };

        if let Err(e) = &result {
            debug!("'{}' failed with {}: {}", method, e.code, e.message);
        }
        RpcResponse::from_result(result, request.id)
    }

    fn list_resources(&self) -> Value {
        let resources: Vec<Value> = self
            .datasets
            .iter()
            .map(|d| json!({ "name": d.name, "description": d.description }))
            .collect();
        json!({ "resources": resources })
    }

    fn rows_of(&self, name: &str) -> Result<Vec<TabularRecord>, RpcError> {
        let dataset = self
            .datasets
            .get(name)
            .ok_or_else(|| RpcError::not_found(format!("unknown resource: {}", name)))?;

        dataset.rows().map_err(|e| match e {
            DatasetError::NotFound(_) => RpcError::not_found(e.to_string()),
            other => {
                warn!("Dataset {} unavailable: {}", name, other);
                RpcError::internal(other.to_string())
            }
        })
    }

    fn read_resource(&self, params: &Map<String, Value>) -> RpcResult {
        let name = params::text(params, "name");
        let mut rows = self.rows_of(&name)?;
        if let Some(fields) = params::fields(params) {
            rows = datasets::project(rows, &fields);
        }
        Ok(json!({ "rows": rows, "source": "demo" }))
    }

    fn query_resource(&self, params: &Map<String, Value>) -> RpcResult {
        let name = params::text(params, "name");
        let q = params::text(params, "q");
        let fields = params::fields(params);
        let rows = self.rows_of(&name)?;

        if q.is_empty() {
            return Ok(json!({ "matched": rows.len(), "rows": rows }));
        }

        // Only the first extracted name is used as the filter key
        let key = extract_person_names(&q)
            .into_iter()
            .next()
            .map(|n| n.to_lowercase())
            .ok_or_else(|| {
                RpcError::bad_request("query_resource could not find a person name in 'q'")
            })?;

        let rows = datasets::filter_rows(rows, &key, fields.as_deref());
        debug!("query_resource {} '{}' matched {} rows", name, key, rows.len());
        Ok(json!({ "matched": rows.len(), "rows": rows }))
    }

    /// Shared by `web_search` and the `web.search` tool; `label` names the
    /// caller in error messages
    async fn web_search(&self, params: &Map<String, Value>, label: &str) -> RpcResult {
        let q = params::text(params, "q");
        if q.is_empty() {
            return Err(RpcError::bad_request(format!("{} requires 'q'", label)));
        }

        let options = SearchOptions {
            safesearch: params::opt_text(params, "safesearch"),
            mkt: params::opt_text(params, "mkt"),
            gl: params::opt_text(params, "gl"),
            hl: params::opt_text(params, "hl"),
        };
        let provider = params::opt_text(params, "provider");
        let query = SearchQuery::new(q)
            .with_selection(ProviderSelection::parse(provider.as_deref()))
            .with_count(params::count(params, crate::DEFAULT_COUNT)?)
            .with_options(options);

        match self.search.execute(&query).await {
            Ok(response) => serde_json::to_value(response)
                .map_err(|e| RpcError::internal(format!("{} failed: {}", label, e))),
            Err(e) => Err(search_error(e, label)),
        }
    }

    async fn call_tool(&self, params: &Map<String, Value>) -> RpcResult {
        let tool = params::text(params, "name");
        let args = params
            .get("args")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        match tool.as_str() {
            "emp.search" => {
                let mut query = Map::new();
                query.insert("name".to_string(), json!(datasets::EMPLOYEES));
                query.insert("q".to_string(), json!(params::text(&args, "q")));
                if let Some(fields) = args.get("fields") {
                    query.insert("fields".to_string(), fields.clone());
                }
                self.query_resource(&query)
            }
            "hai.chat" => self.hai_chat(&args).await,
            "web.search" => self.web_search(&args, "web.search").await,
            _ => Err(RpcError::not_found(format!("unknown tool: {}", tool))),
        }
    }

    async fn hai_chat(&self, args: &Map<String, Value>) -> RpcResult {
        let messages = match args.get("messages") {
            Some(Value::Array(list)) if !list.is_empty() => Value::Array(list.clone()),
            _ => return Err(RpcError::bad_request("hai.chat requires 'messages'")),
        };

        let mut request = ChatRequest::new(messages).with_passthrough(args);
        request.model = params::opt_text(args, "model");
        request.client_to_use = params::opt_text(args, "client_to_use");

        match self.chat.complete(request).await {
            Ok(content) => Ok(json!({ "message": content })),
            Err(ChatError::Upstream { status, body }) => {
                warn!("Chat gateway returned HTTP {}", status);
                Err(RpcError::upstream("HAI upstream error").with_data(body))
            }
            Err(e) => Err(RpcError::internal(format!("hai.chat failed: {}", e))),
        }
    }
}

fn search_error(e: SearchError, label: &str) -> RpcError {
    warn!("{} failed: {}", label, e);
    match e.upstream_detail() {
        Some(detail) if e.is_upstream() => {
            RpcError::upstream("search upstream error").with_data(detail.to_string())
        }
        _ => RpcError::internal(format!("{} failed: {}", label, e)),
    }
}
