//! Error handling for the MCP dispatcher

use chaos_protocol::jsonrpc::JsonRpcError;
use thiserror::Error;

/// Result type for dispatcher operations
pub type McpResult<T> = Result<T, McpError>;

/// Errors that can occur while serving MCP requests
///
/// Everything here stays below the process level: each variant becomes
/// a JSON-RPC error response and the serve loop continues.
#[derive(Debug, Error)]
pub enum McpError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl McpError {
    /// Convert to a JSON-RPC error object
    pub fn to_jsonrpc_error(&self) -> JsonRpcError {
        match self {
            McpError::InvalidParams(msg) => {
                JsonRpcError::invalid_params().with_data(serde_json::json!({
                    "message": msg
                }))
            }
            McpError::ToolNotFound(name) => {
                JsonRpcError::method_not_found().with_data(serde_json::json!({
                    "message": format!("Tool not found: {}", name)
                }))
            }
            _ => JsonRpcError::internal_error().with_data(serde_json::json!({
                "message": self.to_string()
            })),
        }
    }
}
