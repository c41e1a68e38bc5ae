//! Chaos Intelligence MCP server
//!
//! Exposes the hosted Chaos Intelligence tool catalog (thoughts,
//! streams, pages, Resonate posts) over a local MCP stdio surface,
//! validating arguments locally and forwarding each call through
//! `chaos_client` as a single remote JSON-RPC invocation.

pub mod catalog;
pub mod error;
pub mod schema;
pub mod server;

// Re-export key types
pub use catalog::{Catalog, ToolDef};
pub use error::{McpError, McpResult};
pub use server::{serve_stdio, McpServer};
