//! Entities module - Domain entities
//!
//! Every entity maps one table of the database (see `migrations/`).

pub mod enums;
pub mod guest;
pub mod guestbook_message;
pub mod rsvp_response;
pub mod user;

// Re-exports per facilitare l'import
pub use enums::{GuestCategory, RsvpStatus};
pub use guest::Guest;
pub use guestbook_message::GuestbookMessage;
pub use rsvp_response::RsvpResponse;
pub use user::User;
