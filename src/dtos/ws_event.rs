//! WebSocket Event DTOs - Realtime notifications pushed to subscribers

use crate::dtos::GuestbookMessageDTO;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChangedTable {
    Guests,
    RsvpResponses,
    GuestbookMessages,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChangeAction {
    Insert,
    Update,
    Delete,
}

/// Tells a subscriber which list to refetch
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub table: ChangedTable,
    pub action: ChangeAction,
    /// Primary key of the changed row, `None` for bulk changes (CSV import)
    pub id: Option<i64>,
}

/// Tagged union of the WebSocket frames.
/// Serde serializes it as { "type": "Change", "data": { ... } }
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(tag = "type", content = "data")]
pub enum WsEventDTO {
    Change(ChangeEvent),
    MessageApproved(GuestbookMessageDTO),
    /// The subscriber fell behind and missed `missed` events: refetch everything
    Resync { missed: u64 },
}
