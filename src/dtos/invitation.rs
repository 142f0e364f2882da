//! Invitation DTOs - What the public page learns from an invitation code

use crate::dtos::{GuestDTO, RsvpResponseDTO};
use serde::{Deserialize, Serialize};

/// Query parameters of the invitation link: /?i=LP001
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct InvitationQuery {
    #[serde(default)]
    pub i: Option<String>,
}

impl InvitationQuery {
    /// The code, ignoring an empty or blank parameter
    pub fn code(&self) -> Option<&str> {
        self.i.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }
}

/// Both fields are `None` for the generic (code-less) view
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct InvitationDTO {
    pub guest: Option<GuestDTO>,
    pub rsvp_response: Option<RsvpResponseDTO>,
}
