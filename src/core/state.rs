//! Application State - Stato globale dell'applicazione
//!
//! Contiene tutti i repository, configurazioni e stato condiviso
//! necessario per gestire l'applicazione.

use crate::repositories::{
    GuestRepository, GuestbookMessageRepository, RsvpResponseRepository, UserRepository,
};
use crate::ws::ChangeFeed;
use sqlx::SqlitePool;

/// Prefix of the generated invitation codes when none is configured
pub const DEFAULT_CODE_PREFIX: &str = "LP";

/// Stato globale dell'applicazione condiviso tra tutte le route e middleware
pub struct AppState {
    /// Guest directory
    pub guest: GuestRepository,

    /// One RSVP response per guest
    pub rsvp: RsvpResponseRepository,

    pub guestbook: GuestbookMessageRepository,

    /// Console accounts
    pub user: UserRepository,

    /// Secret key per JWT token
    pub jwt_secret: String,

    /// Prefix of the sequential invitation codes
    pub code_prefix: String,

    /// Realtime notifications for the admin console and the public guestbook
    pub changes: ChangeFeed,
}

impl AppState {
    /// Crea una nuova istanza di AppState inizializzando tutti i repository
    /// con il pool di connessioni fornito e la JWT secret.
    pub fn new(pool: SqlitePool, jwt_secret: String) -> Self {
        Self {
            guest: GuestRepository::new(pool.clone()),
            rsvp: RsvpResponseRepository::new(pool.clone()),
            guestbook: GuestbookMessageRepository::new(pool.clone()),
            user: UserRepository::new(pool),
            jwt_secret,
            code_prefix: DEFAULT_CODE_PREFIX.to_string(),
            changes: ChangeFeed::new(),
        }
    }

    pub fn with_code_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.code_prefix = prefix.into();
        self
    }
}
