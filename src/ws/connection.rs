//! WebSocket Connection Management - Forwarding of the broadcast events

use crate::dtos::WsEventDTO;
use crate::ws::{PING_INTERVAL_SECONDS, TIMEOUT_DURATION_SECONDS};
use axum::body::Bytes;
use axum::extract::ws::{Message, Utf8Bytes, WebSocket};
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast::Receiver;
use tokio::time::{Duration, Instant, interval};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tracing::{error, info, instrument, warn};

/// Pushes every event of `rx` to the client as a JSON text frame until the
/// client goes away. The connection is one-way: the server pings every
/// `PING_INTERVAL_SECONDS`, and a client that has not answered (nor sent any
/// other frame) for `TIMEOUT_DURATION_SECONDS` is dropped.
#[instrument(skip(ws, rx))]
pub async fn stream_events(ws: WebSocket, rx: Receiver<WsEventDTO>, feed: &'static str) {
    info!("WebSocket connection established");

    let (mut ws_tx, mut ws_rx) = ws.split();
    let mut events = BroadcastStream::new(rx);
    let idle_timeout = Duration::from_secs(TIMEOUT_DURATION_SECONDS);
    let mut heartbeat = interval(Duration::from_secs(PING_INTERVAL_SECONDS));
    heartbeat.tick().await; // first tick fires immediately
    let mut last_seen = Instant::now();

    loop {
        tokio::select! {
            next = events.next() => {
                let event = match next {
                    Some(Ok(event)) => event,
                    Some(Err(BroadcastStreamRecvError::Lagged(missed))) => {
                        warn!(missed, "Subscriber lagged, asking for a resync");
                        WsEventDTO::Resync { missed }
                    }
                    None => {
                        info!("Feed closed");
                        break;
                    }
                };

                if send_event(&mut ws_tx, &event).await.is_err() {
                    warn!("Failed to send event, closing connection");
                    break;
                }
            }

            incoming = ws_rx.next() => {
                match incoming {
                    Some(Ok(Message::Close(_))) | None => {
                        info!("Client closed the connection");
                        break;
                    }
                    // pongs and anything else only prove the client is alive
                    Some(Ok(_)) => last_seen = Instant::now(),
                    Some(Err(e)) => {
                        warn!("WebSocket error: {:?}", e);
                        break;
                    }
                }
            }

            _ = heartbeat.tick() => {
                if last_seen.elapsed() >= idle_timeout {
                    warn!(timeout_secs = TIMEOUT_DURATION_SECONDS, "No pong received, connection timeout");
                    break;
                }
                if ws_tx.send(Message::Ping(Bytes::new())).await.is_err() {
                    warn!("Failed to send ping, closing connection");
                    break;
                }
            }
        }
    }

    let _ = ws_tx.close().await;
    info!("WebSocket connection terminated");
}

async fn send_event(
    ws_tx: &mut SplitSink<WebSocket, Message>,
    event: &WsEventDTO,
) -> Result<(), axum::Error> {
    let json = serde_json::to_string(event).map_err(|e| {
        error!("Failed to serialize event: {:?}", e);
        axum::Error::new(e)
    })?;

    ws_tx.send(Message::Text(Utf8Bytes::from(json))).await
}
