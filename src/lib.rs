//! Server library - espone i moduli principali per i test

pub mod core;
pub mod csv;
pub mod dtos;
pub mod entities;
pub mod repositories;
pub mod services;
pub mod ws;

// Re-export dei tipi principali per facilitare l'import
pub use crate::core::{AppError, AppState, auth, config};
pub use services::root;

use axum::{
    Router, middleware,
    routing::{any, get, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Crea il router principale dell'applicazione
pub fn create_router(state: Arc<AppState>) -> Router {
    use services::*;

    Router::new()
        .route("/", get(root))
        .route("/invitation", get(get_invitation))
        .route("/invitation/rsvp", post(submit_rsvp))
        .nest("/guestbook", configure_guestbook_routes())
        .nest("/auth", configure_auth_routes())
        .nest("/admin", configure_admin_routes(state.clone()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Configura le routes di autenticazione (login, register)
fn configure_auth_routes() -> Router<Arc<AppState>> {
    use services::*;
    Router::new()
        .route("/login", post(login_user))
        .route("/register", post(register_user))
}

/// Public guestbook: submission, approved feed and its live stream
fn configure_guestbook_routes() -> Router<Arc<AppState>> {
    use services::*;
    Router::new()
        .route("/", get(list_public_messages).post(submit_message))
        .route("/live", any(ws::guestbook_live_ws))
}

/// Admin console. Every route requires a valid token of an admin account.
fn configure_admin_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::{admin_middleware, authentication_middleware};
    use services::*;

    Router::new()
        .route("/stats", get(get_stats))
        .route("/guests", get(list_guests).post(create_guest))
        .route("/guests/import", post(import_guests))
        .route("/guests/export", get(export_guests))
        .route(
            "/guests/{guest_id}",
            get(get_guest).patch(update_guest).delete(delete_guest),
        )
        .route("/rsvps", get(list_rsvps))
        .route("/rsvps/export", get(export_rsvps))
        .route("/guestbook", get(list_messages))
        .route("/guestbook/export", get(export_messages))
        .route("/guestbook/{message_id}", axum::routing::delete(delete_message))
        .route("/guestbook/{message_id}/approve", post(approve_message))
        .route("/guestbook/{message_id}/reject", post(reject_message))
        .route("/changes", any(ws::admin_changes_ws))
        // layers run bottom-up: authentication first, then the admin check
        .layer(middleware::from_fn(admin_middleware))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}
