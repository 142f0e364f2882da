//! Invitation services - Public invitation view and RSVP submission

use crate::core::{AppError, AppState};
use crate::dtos::{
    ChangeAction, ChangeEvent, ChangedTable, GuestDTO, InvitationDTO, InvitationQuery,
    RsvpResponseDTO, SubmitRsvpDTO, UpsertRsvpDTO, blank_to_none,
};
use crate::entities::Guest;
use axum::extract::{Json, Query, State};
use axum::http::StatusCode;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

/// Resolves `code` to its guest or fails with 404 `message`
async fn resolve_guest(
    state: &AppState,
    code: &str,
    message: &'static str,
) -> Result<Guest, AppError> {
    state
        .guest
        .find_by_invitation_code(code)
        .await?
        .ok_or_else(|| {
            warn!("Unknown invitation code");
            AppError::not_found(message)
        })
}

#[instrument(skip(state, query), fields(code = ?query.i))]
pub async fn get_invitation(
    State(state): State<Arc<AppState>>,
    Query(query): Query<InvitationQuery>,
) -> Result<Json<InvitationDTO>, AppError> {
    // 1. Without a code (or with a blank one) return the generic view
    // 2. Resolve the code to its guest, 404 when unknown
    // 3. Load the guest's response, if any

    let Some(code) = query.code() else {
        debug!("No invitation code, generic view");
        return Ok(Json(InvitationDTO::default()));
    };

    let guest = state
        .guest
        .find_by_invitation_code(code)
        .await?
        .ok_or_else(|| {
            warn!("Unknown invitation code");
            AppError::not_found("Invalid invitation code")
                .with_details("Open the invitation without the `i` parameter for the generic view")
        })?;

    let rsvp_response = state.rsvp.find_by_guest_id(&guest.guest_id).await?;

    info!(guest_id = guest.guest_id, answered = rsvp_response.is_some(), "Invitation resolved");
    Ok(Json(InvitationDTO {
        guest: Some(GuestDTO::from(guest)),
        rsvp_response: rsvp_response.map(RsvpResponseDTO::from),
    }))
}

#[instrument(skip(state, query, body), fields(code = ?query.i, attending = body.is_attending))]
pub async fn submit_rsvp(
    State(state): State<Arc<AppState>>,
    Query(query): Query<InvitationQuery>,
    Json(body): Json<SubmitRsvpDTO>,
) -> Result<(StatusCode, Json<RsvpResponseDTO>), AppError> {
    // 1. Resolve the invitation code, 404 "Guest not found" otherwise
    // 2. Validate the headcount and the remarks length
    // 3. Upsert the response keyed on guest_id (201 first time, 200 afterwards)
    // 4. Notify the admin console

    let code = query
        .code()
        .ok_or_else(|| AppError::not_found("Guest not found"))?;
    let guest = resolve_guest(&state, code, "Guest not found").await?;

    body.validate()?;

    let (response, created) = state
        .rsvp
        .upsert(&UpsertRsvpDTO {
            guest_id: guest.guest_id,
            is_attending: body.is_attending,
            num_adults: body.num_adults,
            num_children: body.num_children,
            remarks: body.remarks.as_deref().and_then(blank_to_none),
        })
        .await?;

    let (status, action) = if created {
        (StatusCode::CREATED, ChangeAction::Insert)
    } else {
        (StatusCode::OK, ChangeAction::Update)
    };

    state.changes.publish(ChangeEvent {
        table: ChangedTable::RsvpResponses,
        action,
        id: Some(response.rsvp_id),
    });

    info!(guest_id = guest.guest_id, ?action, "RSVP stored");
    Ok((status, Json(RsvpResponseDTO::from(response))))
}
