//! MCP stdio server
//!
//! Reads line-delimited JSON-RPC messages and writes one response per line.

use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::mcp::error::McpError;
use crate::mcp::handler::McpHandler;
use crate::mcp::protocol::{JsonRpcId, JsonRpcRequest, JsonRpcResponse};

pub struct StdioServer {
    handler: McpHandler,
}

impl StdioServer {
    pub fn new(handler: McpHandler) -> Self {
        Self { handler }
    }

    /// Serve on the process's stdin/stdout until EOF or cancellation.
    pub async fn run_stdio(&self, cancel: CancellationToken) -> anyhow::Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.serve(stdin, stdout, cancel).await
    }

    /// Serve over an arbitrary reader/writer pair.
    pub async fn serve<R, W>(
        &self,
        mut reader: R,
        mut writer: W,
        cancel: CancellationToken,
    ) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("Starting MCP stdio server");

        let mut buf = Vec::new();

        loop {
            buf.clear();
            let read = tokio::select! {
                _ = cancel.cancelled() => {
                    info!("MCP stdio server cancelled");
                    return Ok(());
                }
                read = reader.read_until(b'\n', &mut buf) => read?,
            };

            if read == 0 {
                break;
            }

            let request = match decode_request(&buf) {
                Ok(Some(req)) => req,
                Ok(None) => continue,
                Err((id, e)) => {
                    warn!(error = %e, "Rejected JSON-RPC input line");
                    write_response(&mut writer, &JsonRpcResponse::failure(id, e.into())).await?;
                    continue;
                }
            };

            if let Some(response) = self.handler.handle_request(request).await {
                write_response(&mut writer, &response).await?;
            }
        }

        info!("MCP stdio server shutting down (EOF received)");
        Ok(())
    }
}

/// Decode one raw input line. Blank lines yield `Ok(None)`.
///
/// Bytes that are not UTF-8 or not JSON are parse errors; well-formed JSON
/// that is not a request object is an invalid request, answered with the
/// line's `id` when one can be recovered.
fn decode_request(raw: &[u8]) -> Result<Option<JsonRpcRequest>, (Option<JsonRpcId>, McpError)> {
    let line = std::str::from_utf8(raw)
        .map_err(|e| (None, McpError::ParseError(format!("invalid UTF-8: {}", e))))?;

    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    debug!(line = %line, "Received input line");

    let value: Value =
        serde_json::from_str(line).map_err(|e| (None, McpError::ParseError(e.to_string())))?;

    serde_json::from_value::<JsonRpcRequest>(value.clone())
        .map(Some)
        .map_err(|e| {
            let id = value
                .get("id")
                .and_then(|id| serde_json::from_value::<JsonRpcId>(id.clone()).ok());
            (id, McpError::InvalidRequest(e.to_string()))
        })
}

async fn write_response<W>(writer: &mut W, response: &JsonRpcResponse) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let json = serde_json::to_string(response)?;
    debug!(response = %json, "Writing response");

    writer.write_all(json.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;

    Ok(())
}
