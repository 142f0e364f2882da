//! Stats service - Dashboard figures

use crate::core::{AppError, AppState};
use crate::dtos::RsvpStatsDTO;
use axum::extract::{Json, State};
use futures::future::try_join3;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Recomputed from the full guest and response sets on every call
#[instrument(skip(state))]
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Result<Json<RsvpStatsDTO>, AppError> {
    // the three reads are independent
    let (total_guests, responses, guestbook_messages) = try_join3(
        state.guest.count(),
        state.rsvp.list_all(),
        state.guestbook.count(),
    )
    .await?;

    let stats = RsvpStatsDTO::compute(total_guests, &responses, guestbook_messages);
    debug!(?stats, "Stats computed");

    Ok(Json(stats))
}
