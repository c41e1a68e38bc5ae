//! Wire types for the Chaos Intelligence MCP proxy
//!
//! This crate carries data only: JSON-RPC 2.0 envelopes and the MCP
//! protocol subset the proxy speaks. No I/O, no behavior beyond serde.

pub mod jsonrpc;
pub mod mcp;

pub use jsonrpc::{
    error_response, success_response, JsonRpcError, JsonRpcRequest, JsonRpcResponse, RequestId,
    JSONRPC_VERSION,
};
pub use mcp::{
    CallToolParams, CallToolResult, ContentBlock, Implementation, InitializeParams,
    InitializeResult, ListToolsResult, ServerCapabilities, TextContent, Tool, ToolsCapability,
    LATEST_PROTOCOL_VERSION, METHOD_INITIALIZE, METHOD_PING, METHOD_TOOLS_CALL, METHOD_TOOLS_LIST,
    SUPPORTED_PROTOCOL_VERSIONS,
};
