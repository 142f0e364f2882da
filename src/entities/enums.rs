//! Enumerazioni - Enumerated types used by the entities

use serde::{Deserialize, Serialize};

use super::RsvpResponse;

// ********************* ENUMERAZIONI UTILI **********************//

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum GuestCategory {
    Family,
    #[default]
    Friend,
    Colleague,
    Vip,
}

impl GuestCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            GuestCategory::Family => "family",
            GuestCategory::Friend => "friend",
            GuestCategory::Colleague => "colleague",
            GuestCategory::Vip => "vip",
        }
    }

    /// Lenient parsing used by the CSV import: accepts the stored names and
    /// the labels shown in the admin console, anything else falls back to
    /// `Friend`.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "family" | "famille" => GuestCategory::Family,
            "colleague" | "collègue" | "collegue" => GuestCategory::Colleague,
            "vip" => GuestCategory::Vip,
            _ => GuestCategory::Friend,
        }
    }
}

/// Status of a guest's invitation as seen by the RSVP tracking view.
/// Derived, never stored.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RsvpStatus {
    Confirmed,
    Declined,
    Pending,
}

impl RsvpStatus {
    pub fn of(response: Option<&RsvpResponse>) -> Self {
        match response {
            None => RsvpStatus::Pending,
            Some(r) if r.is_attending => RsvpStatus::Confirmed,
            Some(_) => RsvpStatus::Declined,
        }
    }

    /// Label used in the CSV export
    pub fn label(&self) -> &'static str {
        match self {
            RsvpStatus::Confirmed => "Confirmé",
            RsvpStatus::Declined => "Décliné",
            RsvpStatus::Pending => "En attente",
        }
    }
}
