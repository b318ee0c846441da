//! End-to-end MCP sessions: stdio framing, handler, gateway and the real
//! HTTP client pointed at a wiremock server.

use std::sync::Arc;

use openai_mcp::config::GatewayConfig;
use openai_mcp::mcp::{McpHandler, StdioServer};
use openai_mcp::openai::{ApiKey, OpenAiClient};
use openai_mcp::tools::ToolGateway;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn server_for(mock: &MockServer) -> StdioServer {
    let config = GatewayConfig {
        api_base_url: mock.uri(),
        ..GatewayConfig::default()
    };
    let client = OpenAiClient::new(&config, ApiKey::new("sk-test")).unwrap();
    StdioServer::new(McpHandler::new(Arc::new(ToolGateway::new(Arc::new(client)))))
}

async fn run_session(mock: &MockServer, requests: &[Value]) -> Vec<Value> {
    let mut input = String::new();
    for req in requests {
        input.push_str(&req.to_string());
        input.push('\n');
    }

    let mut output = Vec::new();
    server_for(mock)
        .serve(input.as_bytes(), &mut output, CancellationToken::new())
        .await
        .unwrap();

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

fn chat_call(id: i64, arguments: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": { "name": "openai_chat", "arguments": arguments }
    })
}

#[tokio::test]
async fn test_full_session_with_default_model() {
    let mock = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({ "model": "gpt-4o" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": "Paris" } }]
        })))
        .expect(1)
        .mount(&mock)
        .await;

    let responses = run_session(
        &mock,
        &[
            json!({ "jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {} }),
            json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }),
            json!({ "jsonrpc": "2.0", "id": 2, "method": "tools/list" }),
            chat_call(3, json!({
                "messages": [{ "role": "user", "content": "Capital of France?" }]
            })),
        ],
    )
    .await;

    assert_eq!(responses.len(), 3);
    assert_eq!(responses[1]["result"]["tools"][0]["name"], "openai_chat");
    assert_eq!(
        responses[2]["result"],
        json!({ "content": [{ "type": "text", "text": "Paris" }], "isError": false })
    );
}

#[tokio::test]
async fn test_rejections_never_reach_remote_api() {
    let mock = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock)
        .await;

    let responses = run_session(
        &mock,
        &[
            chat_call(1, json!({
                "messages": [{ "role": "user", "content": "hi" }],
                "model": "gpt-4-turbo"
            })),
            chat_call(2, json!({ "messages": [{ "role": "narrator", "content": "hi" }] })),
            json!({
                "jsonrpc": "2.0",
                "id": 3,
                "method": "tools/call",
                "params": { "name": "dalle_image", "arguments": {} }
            }),
        ],
    )
    .await;

    assert_eq!(responses[0]["result"]["isError"], true);
    assert_eq!(
        responses[0]["result"]["content"][0]["text"],
        "Invalid model: gpt-4-turbo. Supported models: gpt-4o, gpt-4o-mini, o1-preview, o1-mini"
    );
    assert_eq!(responses[1]["result"]["isError"], true);
    assert_eq!(responses[2]["error"]["code"], -32601);
    assert!(responses[2].get("result").is_none());
}

#[tokio::test]
async fn test_remote_failure_is_reported_as_tool_error() {
    let mock = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": { "message": "Rate limit reached", "type": "requests" }
        })))
        .expect(1)
        .mount(&mock)
        .await;

    let responses = run_session(
        &mock,
        &[chat_call(1, json!({
            "messages": [{ "role": "user", "content": "hi" }],
            "model": "o1-mini"
        }))],
    )
    .await;

    assert_eq!(responses[0]["result"]["isError"], true);
    assert_eq!(
        responses[0]["result"]["content"][0]["text"],
        "OpenAI API error: 429 Too Many Requests: Rate limit reached"
    );
}

#[tokio::test]
async fn test_serves_over_duplex_stream() {
    let mock = MockServer::start().await;
    let server = server_for(&mock);

    let (client_end, server_end) = tokio::io::duplex(4096);
    let (server_read, server_write) = tokio::io::split(server_end);
    let cancel = CancellationToken::new();

    let task_cancel = cancel.clone();
    let handle = tokio::spawn(async move {
        server
            .serve(BufReader::new(server_read), server_write, task_cancel)
            .await
    });

    let (client_read, mut client_write) = tokio::io::split(client_end);
    let mut lines = BufReader::new(client_read).lines();

    client_write
        .write_all(b"{\"jsonrpc\":\"2.0\",\"id\":\"a\",\"method\":\"ping\"}\n")
        .await
        .unwrap();
    let line = lines.next_line().await.unwrap().unwrap();
    let resp: Value = serde_json::from_str(&line).unwrap();
    assert_eq!(resp["id"], "a");
    assert_eq!(resp["result"], json!({}));

    cancel.cancel();
    handle.await.unwrap().unwrap();
}
