//! RSVP DTOs - Data Transfer Objects for RSVP responses

use crate::entities::RsvpResponse;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RsvpResponseDTO {
    pub rsvp_id: i64,
    pub guest_id: i64,
    pub is_attending: bool,
    pub num_adults: i32,
    pub num_children: i32,
    pub remarks: Option<String>,
    pub responded_at: DateTime<Utc>,
}

impl From<RsvpResponse> for RsvpResponseDTO {
    fn from(value: RsvpResponse) -> Self {
        Self {
            rsvp_id: value.rsvp_id,
            guest_id: value.guest_id,
            is_attending: value.is_attending,
            num_adults: value.num_adults,
            num_children: value.num_children,
            remarks: value.remarks,
            responded_at: value.responded_at,
        }
    }
}

/// Body of the public RSVP form. The headcount bounds are the ones the
/// form's steppers allow.
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct SubmitRsvpDTO {
    pub is_attending: bool,

    #[validate(range(min = 1, max = 10, message = "Adults must be between 1 and 10"))]
    pub num_adults: i32,

    #[validate(range(min = 0, max = 10, message = "Children must be between 0 and 10"))]
    pub num_children: i32,

    #[validate(length(max = 1000, message = "Remarks must be at most 1000 characters"))]
    #[serde(default)]
    pub remarks: Option<String>,
}

/// Repository input of the RSVP upsert, keyed on guest_id
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UpsertRsvpDTO {
    pub guest_id: i64,
    pub is_attending: bool,
    pub num_adults: i32,
    pub num_children: i32,
    pub remarks: Option<String>,
}
