//! HTTP request handlers

use super::state::AppState;
use crate::rpc::{RpcError, RpcRequest, RpcResponse};
use axum::{body::Bytes, extract::State, response::IntoResponse, Json};
use serde_json::Value;
use tracing::debug;

/// JSON-RPC endpoint.
///
/// Errors travel inside the envelope, so the HTTP status is always 200.
pub async fn rpc(State(state): State<AppState>, body: Bytes) -> Json<RpcResponse> {
    let request: RpcRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            debug!("Rejecting malformed body: {}", e);
            return Json(RpcResponse::err(RpcError::parse_error(), Value::Null));
        }
    };

    Json(state.dispatcher.dispatch(request).await)
}

/// Health check handler
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION
    }))
}
