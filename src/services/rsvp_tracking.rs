//! RSVP tracking services - Every guest next to its answer

use crate::core::{AppError, AppState};
use crate::csv;
use crate::dtos::{RsvpTrackingDTO, TrackingQuery, tracking};
use crate::services::csv_attachment;
use axum::{
    extract::{Json, Query, State},
    response::IntoResponse,
};
use futures::future::try_join;
use std::sync::Arc;
use tracing::{debug, instrument};

#[instrument(skip(state, query), fields(status = ?query.status))]
pub async fn list_rsvps(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TrackingQuery>,
) -> Result<Json<RsvpTrackingDTO>, AppError> {
    let (guests, responses) = try_join(state.guest.list_all(), state.rsvp.list_all()).await?;
    debug!(guests = guests.len(), responses = responses.len(), "Joining guests and responses");

    Ok(Json(RsvpTrackingDTO::build(guests, responses, query.status)))
}

#[instrument(skip(state))]
pub async fn export_rsvps(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    let (guests, responses) = try_join(state.guest.list_all(), state.rsvp.list_all()).await?;
    let rows = tracking::join(guests, responses);

    Ok(csv_attachment("rsvp.csv", csv::rsvp_csv(&rows)))
}
