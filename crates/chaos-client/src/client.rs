//! HTTP client that forwards tool calls to the hosted Chaos MCP endpoint
//!
//! One outbound call per invocation, no retries. Every outcome resolves
//! to a `CallToolResult`; the caller never sees a transport-level error.

use std::error::Error as _;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde_json::{json, Map, Value};
use tokio::time::timeout;
use tracing::{debug, warn};

use chaos_protocol::jsonrpc::{JsonRpcRequest, JsonRpcResponse, RequestId};
use chaos_protocol::mcp::{CallToolResult, METHOD_TOOLS_CALL};

use crate::credential::ApiKey;

const API_ENDPOINT: &str = "https://api.chaosintelligenceinc.com/functions/v1/chaos-mcp-server";
const CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// Transport client for the hosted Chaos API
///
/// Safe to call concurrently; the request-id counter is the only shared
/// mutable state.
pub struct ChaosClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: ApiKey,
    call_timeout: Duration,
    next_id: AtomicI64,
}

impl ChaosClient {
    /// Client against the production endpoint with the fixed 30 s timeout
    pub fn new(api_key: ApiKey) -> Self {
        Self::with_endpoint(api_key, API_ENDPOINT)
    }

    /// Client against a custom endpoint (tests point this at a mock server)
    pub fn with_endpoint(api_key: ApiKey, endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key,
            call_timeout: CALL_TIMEOUT,
            next_id: AtomicI64::new(1),
        }
    }

    /// Override the call timeout
    pub fn with_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    /// Forward one validated tool invocation as a single remote call
    ///
    /// Never returns an error: every failure class resolves to a result
    /// with `isError: true` and one diagnostic text block.
    pub async fn call_tool(&self, name: &str, arguments: Map<String, Value>) -> CallToolResult {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let payload = JsonRpcRequest::new(
            RequestId::Number(id),
            METHOD_TOOLS_CALL,
            json!({ "name": name, "arguments": arguments }),
        );

        debug!(tool = name, id, "forwarding tool call");

        let call = self.dispatch(name, &payload);
        match timeout(self.call_timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                warn!(tool = name, id, "remote call timed out");
                CallToolResult::error(format!(
                    "Request timed out after {} seconds.",
                    self.call_timeout.as_secs()
                ))
            }
        }
    }

    async fn dispatch(&self, name: &str, payload: &JsonRpcRequest) -> CallToolResult {
        let response = match self
            .http
            .post(&self.endpoint)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key.expose()))
            .json(payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                warn!(tool = name, error = %err, "network failure");
                return CallToolResult::error(network_error_message(&err));
            }
        };

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            warn!(tool = name, "remote rejected credential");
            return CallToolResult::error("Authentication failed. Check your CHAOS_API_KEY.");
        }
        if !status.is_success() {
            warn!(tool = name, status = status.as_u16(), "remote returned failure status");
            return CallToolResult::error(format!(
                "API request failed with status {}",
                status.as_u16()
            ));
        }

        let rpc: JsonRpcResponse = match response.json().await {
            Ok(rpc) => rpc,
            Err(err) => {
                warn!(tool = name, error = %err, "response body was not valid JSON-RPC");
                return CallToolResult::error(format!("Invalid response from API: {}", err));
            }
        };

        if let Some(remote_err) = rpc.error {
            return CallToolResult::error(remote_err.message);
        }

        match rpc.result {
            Some(value) if !value.is_null() => match serde_json::from_value(value) {
                Ok(result) => result,
                Err(err) => {
                    warn!(tool = name, error = %err, "result field had unexpected shape");
                    CallToolResult::error(format!("Invalid response from API: {}", err))
                }
            },
            _ => CallToolResult::error("Empty response from API"),
        }
    }
}

/// Describe a transport failure using the deepest error in the chain
fn network_error_message(err: &reqwest::Error) -> String {
    let mut detail = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        detail = inner.to_string();
        source = inner.source();
    }
    if detail.is_empty() {
        detail = "Check your internet connection.".to_string();
    }
    format!("Network error: {}", detail)
}
