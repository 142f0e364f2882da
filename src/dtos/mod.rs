//! DTOs module - Data Transfer Objects
//!
//! DTOs separate the API representation from the persisted entities.

pub mod guest;
pub mod guestbook;
pub mod invitation;
pub mod rsvp;
pub mod stats;
pub mod tracking;
pub mod user;
pub mod ws_event;

// Re-exports per facilitare l'import
pub use guest::{CreateGuestDTO, GuestDTO, GuestSearchQuery, ImportReportDTO, UpdateGuestDTO};
pub use guestbook::{
    CreateGuestbookMessageDTO, GuestbookFeedQuery, GuestbookMessageDTO, ModerationCountsDTO,
    ModerationFilter, ModerationListDTO, ModerationQuery, SubmitGuestbookMessageDTO,
};
pub use invitation::{InvitationDTO, InvitationQuery};
pub use rsvp::{RsvpResponseDTO, SubmitRsvpDTO, UpsertRsvpDTO};
pub use stats::RsvpStatsDTO;
pub use tracking::{GuestWithRsvpDTO, RsvpTrackingDTO, TrackingCountsDTO, TrackingFilter, TrackingQuery};
pub use user::{CreateUserDTO, LoginDTO, UserDTO};
pub use ws_event::{ChangeAction, ChangeEvent, ChangedTable, WsEventDTO};

/// Trims `value`; blank input becomes `None`
pub fn blank_to_none(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
