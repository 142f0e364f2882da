//! WebSocket Module - Realtime notifications
//!
//! - `/admin/changes`: one `ChangeEvent` per mutation of guests, RSVP
//!   responses or guestbook messages, so the console can refetch
//! - `/guestbook/live`: guestbook messages as soon as they are approved

pub mod connection;
pub mod feed;

pub use connection::stream_events;
pub use feed::ChangeFeed;

use crate::AppState;
use axum::{
    extract::{State, ws::WebSocketUpgrade},
    response::Response,
};
use std::sync::Arc;

/// Events buffered per subscriber before it starts lagging
pub const BROADCAST_CHANNEL_CAPACITY: usize = 64;

/// Interval between two server pings
pub const PING_INTERVAL_SECONDS: u64 = 30;

/// A client that has sent nothing, pongs included, for this long is disconnected
pub const TIMEOUT_DURATION_SECONDS: u64 = 90;

/// Admin change feed. Mounted behind the authentication and admin middlewares.
pub async fn admin_changes_ws(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> Response {
    // subscribe before the upgrade so no event published in between is lost
    let rx = state.changes.subscribe();
    ws.on_upgrade(move |socket| stream_events(socket, rx, "changes"))
}

/// Public feed of approved guestbook messages
pub async fn guestbook_live_ws(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> Response {
    let rx = state.changes.subscribe_approved();
    ws.on_upgrade(move |socket| stream_events(socket, rx, "guestbook"))
}
