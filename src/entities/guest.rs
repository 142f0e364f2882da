//! Guest entity - An invited household, identified by its invitation code

use super::enums::GuestCategory;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Guest {
    pub guest_id: i64,
    pub invitation_code: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub category: GuestCategory,
    // default headcount; the RSVP carries the actual one
    pub num_adults: i32,
    pub num_children: i32,
    pub created_at: DateTime<Utc>,
}

impl Guest {
    /// Builds the `sequence`-th invitation code: prefix plus the number
    /// zero-padded to three digits (`LP001`). Callers derive `sequence`
    /// from the current guest count, so deleting guests and adding new
    /// ones can hand out a code that is still in use; the unique index on
    /// `invitation_code` turns that into a conflict instead of a duplicate.
    pub fn sequential_code(prefix: &str, sequence: i64) -> String {
        format!("{}{:03}", prefix, sequence)
    }
}
