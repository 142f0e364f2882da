//! RsvpResponse entity - The single answer a guest gave to the invitation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct RsvpResponse {
    pub rsvp_id: i64,
    pub guest_id: i64, // unique: one response per guest
    pub is_attending: bool,
    pub num_adults: i32,
    pub num_children: i32,
    pub remarks: Option<String>,
    // refreshed on every submission, no history is kept
    pub responded_at: DateTime<Utc>,
}
