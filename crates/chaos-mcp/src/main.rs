//! Chaos Intelligence MCP server entry point

use anyhow::Result;

use chaos_client::{ApiKey, ChaosClient, CredentialError};
use chaos_mcp::server::{serve_stdio, McpServer};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout is the protocol channel
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let api_key = match ApiKey::from_env() {
        Ok(key) => key,
        Err(err) => {
            eprintln!("Error: {}", err);
            if matches!(err, CredentialError::Missing) {
                eprintln!("Get your API key at https://chaosintelligence.com/settings/api");
            }
            std::process::exit(1);
        }
    };

    let server = McpServer::new(ChaosClient::new(api_key));
    serve_stdio(server).await?;

    Ok(())
}
