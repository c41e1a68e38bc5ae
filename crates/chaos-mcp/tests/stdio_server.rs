//! End-to-end dispatcher tests: MCP messages in, JSON-RPC responses
//! out, with the remote endpoint played by a mock server.

use httpmock::prelude::*;
use serde_json::{json, Value};

use chaos_client::{ApiKey, ChaosClient};
use chaos_mcp::server::McpServer;

fn test_key() -> ApiKey {
    ApiKey::parse("chaos_a1B2c3D4e5F6g7H8i9J0k1L2m3N4o5P6").unwrap()
}

fn server_against(endpoint: String) -> McpServer {
    McpServer::new(ChaosClient::with_endpoint(test_key(), endpoint))
}

async fn respond(server: &McpServer, message: Value) -> Value {
    let response = server
        .process_message(&message.to_string())
        .await
        .expect("message should be processed")
        .expect("request should produce a response");
    serde_json::to_value(&response).unwrap()
}

#[tokio::test]
async fn initialize_negotiates_protocol_version() {
    let server = server_against("http://127.0.0.1:9/unused".to_string());

    let response = respond(
        &server,
        json!({
            "jsonrpc": "2.0", "id": 1, "method": "initialize",
            "params": {"protocolVersion": "2025-03-26", "capabilities": {}, "clientInfo": {"name": "test", "version": "0.0.0"}}
        }),
    )
    .await;

    assert_eq!(response["result"]["protocolVersion"], "2025-03-26");
    assert_eq!(response["result"]["serverInfo"]["name"], "chaos-intelligence");
    assert!(response["result"]["capabilities"]["tools"].is_object());
}

#[tokio::test]
async fn initialize_answers_unsupported_version_with_latest() {
    let server = server_against("http://127.0.0.1:9/unused".to_string());

    let response = respond(
        &server,
        json!({
            "jsonrpc": "2.0", "id": 1, "method": "initialize",
            "params": {"protocolVersion": "1999-01-01"}
        }),
    )
    .await;

    assert_eq!(response["result"]["protocolVersion"], "2025-06-18");
}

#[tokio::test]
async fn tools_list_returns_the_full_catalog() {
    let server = server_against("http://127.0.0.1:9/unused".to_string());

    let response = respond(
        &server,
        json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list", "params": {}}),
    )
    .await;

    let tools = response["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 25);

    let list_thoughts = tools.iter().find(|t| t["name"] == "list_thoughts").unwrap();
    assert_eq!(list_thoughts["inputSchema"]["properties"]["per_page"]["maximum"], 100);
    assert_eq!(list_thoughts["inputSchema"]["properties"]["stream_id"]["format"], "uuid");
}

#[tokio::test]
async fn valid_call_forwards_and_relays_the_result() {
    let mock_server = MockServer::start_async().await;
    let mock = mock_server
        .mock_async(|when, then| {
            when.method(POST).path("/mcp");
            then.status(200).json_body(json!({
                "jsonrpc": "2.0", "id": 1,
                "result": {"content": [{"type": "text", "text": "42 thoughts"}]}
            }));
        })
        .await;

    let server = server_against(mock_server.url("/mcp"));
    let response = respond(
        &server,
        json!({
            "jsonrpc": "2.0", "id": 3, "method": "tools/call",
            "params": {"name": "get_stats", "arguments": {}}
        }),
    )
    .await;

    mock.assert_async().await;
    assert_eq!(response["id"], 3);
    assert_eq!(
        response["result"],
        json!({"content": [{"type": "text", "text": "42 thoughts"}]})
    );
}

#[tokio::test]
async fn declared_defaults_are_forwarded() {
    let mock_server = MockServer::start_async().await;
    let mock = mock_server
        .mock_async(|when, then| {
            when.method(POST).path("/mcp").json_body_partial(
                r#"{"params": {"name": "list_recent_thoughts", "arguments": {"limit": 10}}}"#,
            );
            then.status(200).json_body(json!({
                "jsonrpc": "2.0", "id": 1,
                "result": {"content": [{"type": "text", "text": "recent"}]}
            }));
        })
        .await;

    let server = server_against(mock_server.url("/mcp"));
    respond(
        &server,
        json!({
            "jsonrpc": "2.0", "id": 4, "method": "tools/call",
            "params": {"name": "list_recent_thoughts", "arguments": {}}
        }),
    )
    .await;

    mock.assert_async().await;
}

#[tokio::test]
async fn out_of_range_argument_is_rejected_without_network_activity() {
    let mock_server = MockServer::start_async().await;
    let mock = mock_server
        .mock_async(|when, then| {
            when.method(POST).path("/mcp");
            then.status(200).json_body(json!({"jsonrpc": "2.0", "id": 1, "result": {}}));
        })
        .await;

    let server = server_against(mock_server.url("/mcp"));
    let response = respond(
        &server,
        json!({
            "jsonrpc": "2.0", "id": 5, "method": "tools/call",
            "params": {"name": "list_thoughts", "arguments": {"per_page": 500}}
        }),
    )
    .await;

    mock.assert_hits_async(0).await;
    assert_eq!(response["result"]["isError"], true);
    assert_eq!(
        response["result"]["content"][0]["text"],
        "per_page must be at most 100"
    );
}

#[tokio::test]
async fn malformed_uuid_is_rejected_without_network_activity() {
    let mock_server = MockServer::start_async().await;
    let mock = mock_server
        .mock_async(|when, then| {
            when.method(POST).path("/mcp");
            then.status(200).json_body(json!({"jsonrpc": "2.0", "id": 1, "result": {}}));
        })
        .await;

    let server = server_against(mock_server.url("/mcp"));
    let response = respond(
        &server,
        json!({
            "jsonrpc": "2.0", "id": 6, "method": "tools/call",
            "params": {"name": "get_thought", "arguments": {"thought_id": "not-a-uuid"}}
        }),
    )
    .await;

    mock.assert_hits_async(0).await;
    assert_eq!(response["result"]["isError"], true);
    assert_eq!(
        response["result"]["content"][0]["text"],
        "thought_id must be a valid UUID"
    );
}

#[tokio::test]
async fn unknown_tool_is_a_protocol_error_not_a_tool_result() {
    let server = server_against("http://127.0.0.1:9/unused".to_string());

    let response = respond(
        &server,
        json!({
            "jsonrpc": "2.0", "id": 7, "method": "tools/call",
            "params": {"name": "summon_thought", "arguments": {}}
        }),
    )
    .await;

    assert!(response.get("result").is_none());
    assert_eq!(response["error"]["code"], -32601);
    assert_eq!(response["error"]["data"]["message"], "Tool not found: summon_thought");
}

#[tokio::test]
async fn unknown_method_is_rejected() {
    let server = server_against("http://127.0.0.1:9/unused".to_string());

    let response = respond(
        &server,
        json!({"jsonrpc": "2.0", "id": 8, "method": "resources/list", "params": {}}),
    )
    .await;

    assert_eq!(response["error"]["code"], -32601);
    assert_eq!(response["error"]["data"]["method"], "resources/list");
}

#[tokio::test]
async fn wrong_jsonrpc_version_is_an_invalid_request() {
    let server = server_against("http://127.0.0.1:9/unused".to_string());

    let response = respond(
        &server,
        json!({"jsonrpc": "1.0", "id": 9, "method": "ping"}),
    )
    .await;

    assert_eq!(response["error"]["code"], -32600);
}

#[tokio::test]
async fn notifications_produce_no_response() {
    let server = server_against("http://127.0.0.1:9/unused".to_string());

    let outcome = server
        .process_message(&json!({"jsonrpc": "2.0", "method": "notifications/initialized"}).to_string())
        .await
        .unwrap();

    assert!(outcome.is_none());
}

#[tokio::test]
async fn ping_answers_with_an_empty_object() {
    let server = server_against("http://127.0.0.1:9/unused".to_string());

    let response =
        respond(&server, json!({"jsonrpc": "2.0", "id": 10, "method": "ping"})).await;

    assert_eq!(response["result"], json!({}));
}

#[tokio::test]
async fn envelope_ids_increase_across_calls() {
    let mock_server = MockServer::start_async().await;
    let first = mock_server
        .mock_async(|when, then| {
            when.method(POST).path("/mcp").json_body_partial(r#"{"id": 1}"#);
            then.status(200).json_body(json!({
                "jsonrpc": "2.0", "id": 1,
                "result": {"content": [{"type": "text", "text": "one"}]}
            }));
        })
        .await;
    let second = mock_server
        .mock_async(|when, then| {
            when.method(POST).path("/mcp").json_body_partial(r#"{"id": 2}"#);
            then.status(200).json_body(json!({
                "jsonrpc": "2.0", "id": 2,
                "result": {"content": [{"type": "text", "text": "two"}]}
            }));
        })
        .await;

    let server = server_against(mock_server.url("/mcp"));
    for request_id in [20, 21] {
        respond(
            &server,
            json!({
                "jsonrpc": "2.0", "id": request_id, "method": "tools/call",
                "params": {"name": "get_usage", "arguments": {}}
            }),
        )
        .await;
    }

    first.assert_async().await;
    second.assert_async().await;
}

#[tokio::test]
async fn remote_failure_surfaces_as_error_result_and_server_keeps_serving() {
    let mock_server = MockServer::start_async().await;
    mock_server
        .mock_async(|when, then| {
            when.method(POST).path("/mcp");
            then.status(500);
        })
        .await;

    let server = server_against(mock_server.url("/mcp"));
    let failed = respond(
        &server,
        json!({
            "jsonrpc": "2.0", "id": 11, "method": "tools/call",
            "params": {"name": "get_stats", "arguments": {}}
        }),
    )
    .await;

    assert_eq!(failed["result"]["isError"], true);
    assert_eq!(
        failed["result"]["content"][0]["text"],
        "API request failed with status 500"
    );

    // The process-level surface is unaffected
    let ping = respond(&server, json!({"jsonrpc": "2.0", "id": 12, "method": "ping"})).await;
    assert_eq!(ping["result"], json!({}));
}
