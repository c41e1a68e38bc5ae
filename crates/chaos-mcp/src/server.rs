//! MCP server over stdio
//!
//! Binds the tool catalog to the local JSON-RPC surface: one line in,
//! one line out, logs on stderr. Each `tools/call` is validated against
//! the catalog schema and forwarded 1:1 through the transport client.

use std::io::{BufRead, BufReader, Write};

use serde_json::json;
use tracing::{debug, error, info, warn};

use chaos_client::ChaosClient;
use chaos_protocol::jsonrpc::{
    error_response, success_response, JsonRpcError, JsonRpcRequest, JsonRpcResponse,
    JSONRPC_VERSION,
};
use chaos_protocol::mcp::{
    CallToolParams, CallToolResult, Implementation, InitializeParams, InitializeResult,
    ListToolsResult, ServerCapabilities, ToolsCapability, LATEST_PROTOCOL_VERSION,
    METHOD_INITIALIZE, METHOD_PING, METHOD_TOOLS_CALL, METHOD_TOOLS_LIST,
    SUPPORTED_PROTOCOL_VERSIONS,
};

use crate::catalog::Catalog;
use crate::error::{McpError, McpResult};

pub const SERVER_NAME: &str = "chaos-intelligence";

/// MCP server: the catalog plus one transport client for the process
/// lifetime, both injected at construction.
pub struct McpServer {
    catalog: Catalog,
    client: ChaosClient,
}

impl McpServer {
    pub fn new(client: ChaosClient) -> Self {
        Self { catalog: Catalog::new(), client }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Process a single MCP message
    ///
    /// Returns `None` for notifications. Parse failures are the only
    /// errors that escape; per-method failures become error responses
    /// carrying the request id.
    pub async fn process_message(&self, body: &str) -> McpResult<Option<JsonRpcResponse>> {
        let request: JsonRpcRequest = serde_json::from_str(body).map_err(|e| {
            error!("failed to parse JSON-RPC request: {}", e);
            McpError::Serialization(e)
        })?;

        debug!(method = %request.method, "processing request");

        if request.jsonrpc != JSONRPC_VERSION {
            return Ok(Some(error_response(
                request.id,
                JsonRpcError::invalid_request()
                    .with_data(json!({"message": "Invalid JSON-RPC version"})),
            )));
        }

        // Notifications get no response
        if request.id.is_none() {
            debug!(method = %request.method, "ignoring notification");
            return Ok(None);
        }

        let outcome = match request.method.as_str() {
            METHOD_INITIALIZE => self.handle_initialize(&request),
            METHOD_PING => Ok(success_response(request.id.clone(), json!({}))),
            METHOD_TOOLS_LIST => self.handle_tools_list(&request),
            METHOD_TOOLS_CALL => self.handle_tools_call(&request).await,
            _ => Ok(error_response(
                request.id.clone(),
                JsonRpcError::method_not_found().with_data(json!({"method": request.method})),
            )),
        };

        let response = match outcome {
            Ok(response) => response,
            Err(e) => {
                warn!(method = %request.method, error = %e, "request failed");
                error_response(request.id, e.to_jsonrpc_error())
            }
        };

        Ok(Some(response))
    }

    fn handle_initialize(&self, request: &JsonRpcRequest) -> McpResult<JsonRpcResponse> {
        let params = request
            .params
            .as_ref()
            .ok_or_else(|| McpError::InvalidParams("Missing params for initialize".to_string()))?;

        let init: InitializeParams = serde_json::from_value(params.clone())?;

        // Echo a supported version back, or answer with the latest
        let protocol_version =
            if SUPPORTED_PROTOCOL_VERSIONS.contains(&init.protocol_version.as_str()) {
                init.protocol_version
            } else {
                LATEST_PROTOCOL_VERSION.to_string()
            };

        let result = InitializeResult {
            protocol_version,
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability { list_changed: None }),
            },
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(
                "Chaos Intelligence - capture, search, and browse thoughts, streams, pages, \
                 and Resonate posts"
                    .to_string(),
            ),
        };

        Ok(success_response(request.id.clone(), serde_json::to_value(result)?))
    }

    fn handle_tools_list(&self, request: &JsonRpcRequest) -> McpResult<JsonRpcResponse> {
        let result = ListToolsResult { tools: self.catalog.list_tools(), next_cursor: None };
        Ok(success_response(request.id.clone(), serde_json::to_value(result)?))
    }

    async fn handle_tools_call(&self, request: &JsonRpcRequest) -> McpResult<JsonRpcResponse> {
        let params = request
            .params
            .as_ref()
            .ok_or_else(|| McpError::InvalidParams("Missing params for tools/call".to_string()))?;

        let call: CallToolParams = serde_json::from_value(params.clone())?;

        let def = self
            .catalog
            .get(&call.name)
            .ok_or_else(|| McpError::ToolNotFound(call.name.clone()))?;

        debug!(tool = def.name, "calling tool");

        let args = call.arguments.unwrap_or_default();
        let result = match def.schema.validate(&args) {
            Ok(forwarded) => self.client.call_tool(def.name, forwarded).await,
            Err(reason) => {
                // Rejected locally; no remote call is made
                warn!(tool = def.name, %reason, "invalid tool arguments");
                CallToolResult::error(reason)
            }
        };

        Ok(success_response(request.id.clone(), serde_json::to_value(result)?))
    }
}

/// Serve MCP over stdio, one JSON-RPC message per line
pub async fn serve_stdio(server: McpServer) -> McpResult<()> {
    info!("Chaos Intelligence MCP server running on stdio");

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    for line in BufReader::new(stdin).lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        // MCP does not support JSON-RPC batch arrays
        if trimmed.starts_with('[') {
            error!("batch requests are not supported");
            let response = error_response(
                None,
                JsonRpcError::invalid_request()
                    .with_data(json!({"message": "Batch requests are not supported"})),
            );
            writeln!(stdout, "{}", serde_json::to_string(&response)?)?;
            stdout.flush()?;
            continue;
        }

        match server.process_message(trimmed).await {
            Ok(Some(response)) => {
                writeln!(stdout, "{}", serde_json::to_string(&response)?)?;
                stdout.flush()?;
            }
            Ok(None) => {
                // Notification, nothing to send
            }
            Err(e) => {
                error!("error processing message: {}", e);
                let response = error_response(None, e.to_jsonrpc_error());
                writeln!(stdout, "{}", serde_json::to_string(&response)?)?;
                stdout.flush()?;
            }
        }
    }

    info!("MCP server stopped");
    Ok(())
}
