//! Services module - Coordinatore per tutti i service handler HTTP
//!
//! Questo modulo organizza i service handlers in sotto-moduli separati per una migliore manutenibilità.
//! Ogni modulo gestisce gli endpoint HTTP per una specifica funzionalità.

pub mod auth;
pub mod guestbook;
pub mod guests;
pub mod invitation;
pub mod rsvp_tracking;
pub mod stats;

// Re-exports per facilitare l'import
pub use auth::{login_user, register_user};
pub use guestbook::{
    approve_message, delete_message, export_messages, list_messages, list_public_messages,
    reject_message, submit_message,
};
pub use guests::{
    create_guest, delete_guest, export_guests, get_guest, import_guests, list_guests,
    update_guest,
};
pub use invitation::{get_invitation, submit_rsvp};
pub use rsvp_tracking::{export_rsvps, list_rsvps};
pub use stats::get_stats;

use crate::AppState;
use axum::{
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use std::sync::Arc;

/// Root endpoint - health check
pub async fn root(State(_state): State<Arc<AppState>>) -> impl IntoResponse {
    (StatusCode::OK, "Server is running!")
}

/// Wraps a CSV document as a downloadable attachment
pub(crate) fn csv_attachment(filename: &'static str, body: String) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
}
