//! Tracking DTOs - Every guest next to its RSVP answer, for the admin console

use crate::dtos::{GuestDTO, RsvpResponseDTO};
use crate::entities::{Guest, RsvpResponse, RsvpStatus};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TrackingFilter {
    #[default]
    All,
    Confirmed,
    Declined,
    Pending,
}

impl TrackingFilter {
    pub fn matches(&self, status: RsvpStatus) -> bool {
        match self {
            TrackingFilter::All => true,
            TrackingFilter::Confirmed => status == RsvpStatus::Confirmed,
            TrackingFilter::Declined => status == RsvpStatus::Declined,
            TrackingFilter::Pending => status == RsvpStatus::Pending,
        }
    }
}

/// /admin/rsvps?status=pending
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct TrackingQuery {
    #[serde(default)]
    pub status: TrackingFilter,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GuestWithRsvpDTO {
    #[serde(flatten)]
    pub guest: GuestDTO,
    pub rsvp: Option<RsvpResponseDTO>,
    pub status: RsvpStatus,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackingCountsDTO {
    pub all: usize,
    pub confirmed: usize,
    pub declined: usize,
    pub pending: usize,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RsvpTrackingDTO {
    pub counts: TrackingCountsDTO,
    pub guests: Vec<GuestWithRsvpDTO>,
}

impl RsvpTrackingDTO {
    /// Joins guests with their responses in memory. Guest order is kept;
    /// responses without a guest are ignored.
    pub fn build(guests: Vec<Guest>, responses: Vec<RsvpResponse>, filter: TrackingFilter) -> Self {
        let joined = join(guests, responses);

        let mut counts = TrackingCountsDTO {
            all: joined.len(),
            ..Default::default()
        };
        for row in &joined {
            match row.status {
                RsvpStatus::Confirmed => counts.confirmed += 1,
                RsvpStatus::Declined => counts.declined += 1,
                RsvpStatus::Pending => counts.pending += 1,
            }
        }

        let guests = joined
            .into_iter()
            .filter(|row| filter.matches(row.status))
            .collect();

        Self { counts, guests }
    }
}

/// One row per guest, with its response (if any) and the derived status
pub fn join(guests: Vec<Guest>, responses: Vec<RsvpResponse>) -> Vec<GuestWithRsvpDTO> {
    let mut by_guest: HashMap<i64, RsvpResponse> =
        responses.into_iter().map(|r| (r.guest_id, r)).collect();

    guests
        .into_iter()
        .map(|guest| {
            let rsvp = by_guest.remove(&guest.guest_id);
            GuestWithRsvpDTO {
                status: RsvpStatus::of(rsvp.as_ref()),
                guest: GuestDTO::from(guest),
                rsvp: rsvp.map(RsvpResponseDTO::from),
            }
        })
        .collect()
}
