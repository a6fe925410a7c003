//! Minimal WAMP caller over a WebSocket. Implements just enough of the
//! basic profile (session handshake and the RPC frames) to drive the
//! authoring application's remote procedure surface, with one call in
//! flight at a time. Subscriptions and reconnection are out of scope.

use crate::domain::ports::WaapiRpc;
use crate::utils::error::{Result, WaError};
use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

// WAMP basic-profile message codes.
const HELLO: u64 = 1;
const WELCOME: u64 = 2;
const GOODBYE: u64 = 6;
const ERROR: u64 = 8;
const CALL: u64 = 48;
const RESULT: u64 = 50;

const WAMP_SUBPROTOCOL: &str = "wamp.2.json";
const REALM: &str = "realm1";

/// One WAMP session against the authoring application. Request ids increment
/// monotonically for the lifetime of the session.
#[derive(Debug)]
pub struct WampSocket {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
    next_request: u64,
}

impl WampSocket {
    /// Dial `url`, upgrade with the `wamp.2.json` subprotocol and join the
    /// realm as a caller. Any failure up to and including the WELCOME frame
    /// is reported as a connection failure.
    pub async fn connect(url: &str) -> Result<Self> {
        let mut request = url
            .into_client_request()
            .map_err(|_| WaError::CannotConnectError)?;
        request.headers_mut().insert(
            "Sec-WebSocket-Protocol",
            HeaderValue::from_static(WAMP_SUBPROTOCOL),
        );

        let (stream, _) = connect_async(request)
            .await
            .map_err(|_| WaError::CannotConnectError)?;
        tracing::debug!("WebSocket established to {}", url);

        let mut socket = Self {
            stream,
            next_request: 0,
        };
        socket
            .send_frame(json!([HELLO, REALM, { "roles": { "caller": {} } }]))
            .await
            .map_err(|_| WaError::CannotConnectError)?;

        let welcome = socket
            .recv_frame()
            .await
            .map_err(|_| WaError::CannotConnectError)?;
        match frame_code(&welcome) {
            Some(WELCOME) => {
                tracing::debug!("WAMP session established on realm {}", REALM);
                Ok(socket)
            }
            // ABORT, or anything that is not a WELCOME
            _ => Err(WaError::CannotConnectError),
        }
    }

    /// Leave the session and close the stream.
    pub async fn close(mut self) -> Result<()> {
        self.send_frame(json!([GOODBYE, {}, "wamp.close.normal"]))
            .await?;
        // Best effort: the router echoes a GOODBYE before the close, and may
        // drop the connection right after.
        let _ = self.recv_frame().await;
        if let Err(e) = self.stream.close(None).await {
            tracing::debug!("close after goodbye: {}", e);
        }
        Ok(())
    }

    async fn send_frame(&mut self, frame: Value) -> Result<()> {
        let text = serde_json::to_string(&frame)?;
        self.stream.send(Message::Text(text)).await?;
        Ok(())
    }

    async fn recv_frame(&mut self) -> Result<Value> {
        while let Some(message) = self.stream.next().await {
            match message? {
                Message::Text(text) => return Ok(serde_json::from_str(&text)?),
                Message::Binary(data) => return Ok(serde_json::from_slice(&data)?),
                Message::Close(_) => break,
                // Ping/Pong are handled by tungstenite; raw frames are skipped
                _ => {}
            }
        }
        Err(WaError::ProtocolError {
            message: "connection closed by the authoring application".to_string(),
        })
    }
}

#[async_trait]
impl WaapiRpc for WampSocket {
    async fn call(&mut self, procedure: &str, args: Value, options: Value) -> Result<Value> {
        self.next_request += 1;
        let request = self.next_request;
        tracing::debug!("CALL {} (request {})", procedure, request);

        // WAAPI options travel in the WAMP options position; the request
        // payload goes in the call kwargs.
        self.send_frame(json!([CALL, request, options, procedure, [], args]))
            .await?;

        loop {
            let frame = self.recv_frame().await?;
            let items = frame.as_array().ok_or_else(|| WaError::ProtocolError {
                message: "non-array WAMP frame".to_string(),
            })?;

            match frame_code(&frame) {
                Some(RESULT) if id_at(items, 1) == Some(request) => {
                    // [RESULT, request, details, args, kwargs] — the payload
                    // is the kwargs when present.
                    return Ok(items.get(4).cloned().unwrap_or_else(|| json!({})));
                }
                Some(ERROR)
                    if id_at(items, 1) == Some(CALL) && id_at(items, 2) == Some(request) =>
                {
                    return Err(call_error(procedure, items));
                }
                _ => {
                    tracing::trace!("skipping unrelated WAMP frame");
                }
            }
        }
    }
}

fn frame_code(frame: &Value) -> Option<u64> {
    frame.get(0).and_then(Value::as_u64)
}

fn id_at(items: &[Value], index: usize) -> Option<u64> {
    items.get(index).and_then(Value::as_u64)
}

// [ERROR, CALL, request, details, uri, args?, kwargs?]
fn call_error(procedure: &str, items: &[Value]) -> WaError {
    let uri = items
        .get(4)
        .and_then(Value::as_str)
        .unwrap_or("wamp.error.unknown");
    let message = items
        .get(6)
        .and_then(|kwargs| kwargs.get("message"))
        .and_then(Value::as_str)
        .or_else(|| items.get(5).and_then(|args| args.get(0)).and_then(Value::as_str))
        .map(|detail| format!("{} ({})", detail, uri))
        .unwrap_or_else(|| uri.to_string());
    WaError::CallError {
        procedure: procedure.to_string(),
        message,
    }
}
