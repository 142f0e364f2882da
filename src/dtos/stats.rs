//! Stats DTO - Dashboard counters derived from the full guest and RSVP sets

use crate::entities::RsvpResponse;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RsvpStatsDTO {
    pub total_guests: i64,
    pub confirmed: i64,
    pub declined: i64,
    /// `total_guests - confirmed - declined`, negative if responses outnumber guests
    pub pending: i64,
    pub total_adults: i64,
    pub total_children: i64,
    pub guestbook_messages: i64,
    /// Percentage of guests who answered, rounded; 0 without guests
    pub response_rate: i64,
}

impl RsvpStatsDTO {
    pub fn compute(total_guests: i64, responses: &[RsvpResponse], guestbook_messages: i64) -> Self {
        let confirmed = responses.iter().filter(|r| r.is_attending).count() as i64;
        let declined = responses.len() as i64 - confirmed;

        // headcounts only for people actually coming
        let (total_adults, total_children) = responses
            .iter()
            .filter(|r| r.is_attending)
            .fold((0i64, 0i64), |(adults, children), r| {
                (adults + r.num_adults as i64, children + r.num_children as i64)
            });

        Self {
            total_guests,
            confirmed,
            declined,
            pending: total_guests - confirmed - declined,
            total_adults,
            total_children,
            guestbook_messages,
            response_rate: response_rate(total_guests, confirmed + declined),
        }
    }
}

pub fn response_rate(total_guests: i64, answered: i64) -> i64 {
    if total_guests == 0 {
        return 0;
    }
    (answered as f64 * 100.0 / total_guests as f64).round() as i64
}
