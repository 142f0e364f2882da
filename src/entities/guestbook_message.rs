//! GuestbookMessage entity - Public message held for moderation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct GuestbookMessage {
    pub message_id: i64,
    pub guest_id: Option<i64>,
    pub author_name: String,
    pub message: String,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
}
