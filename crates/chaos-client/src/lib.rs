//! Transport client for the hosted Chaos Intelligence API
//!
//! Owns outbound communication: one JSON-RPC call per tool invocation,
//! bearer-token auth, a fixed timeout, and normalization of every
//! outcome (success, remote error, HTTP failure, network failure,
//! timeout) into the single `CallToolResult` shape.

pub mod client;
pub mod credential;

pub use client::ChaosClient;
pub use credential::{ApiKey, CredentialError};
