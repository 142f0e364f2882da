//! Repositories module - One repository per table
//!
//! Queries are written with the runtime-checked `sqlx::query` / `sqlx::query_as`
//! API and mapped onto the entities through `sqlx::FromRow`, so the crate
//! builds without a live database. The schema they rely on lives in
//! `migrations/`.
//!
//! Number of rows → method to call:
//! - none (INSERT/UPDATE/DELETE)  → `.execute(..)`
//! - zero or one                  → `.fetch_optional(..)`
//! - exactly one (aggregates too) → `.fetch_one(..)`
//! - many                         → `.fetch_all(..)`

pub mod guest;
pub mod guestbook_message;
pub mod rsvp_response;
pub mod traits;
pub mod user;

// Re-esportazione dei trait per facilitare l'import
pub use traits::{Create, Delete, Read, Update};

pub use guest::GuestRepository;
pub use guestbook_message::GuestbookMessageRepository;
pub use rsvp_response::RsvpResponseRepository;
pub use user::UserRepository;

// alias di tipo per il pool, per semplificare lo switch in caso in cui vogliamo usare un altro db
pub type PoolType = sqlx::SqlitePool;
