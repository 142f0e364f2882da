//! Guestbook services - Public submission, public feed and moderation

use crate::core::{AppError, AppState};
use crate::csv;
use crate::dtos::{
    ChangeAction, ChangeEvent, ChangedTable, CreateGuestbookMessageDTO, GuestbookFeedQuery,
    GuestbookMessageDTO, ModerationListDTO, ModerationQuery, SubmitGuestbookMessageDTO,
    blank_to_none,
};
use crate::repositories::{Create, Delete};
use crate::services::csv_attachment;
use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

#[instrument(skip(state, body), fields(author = %body.author_name))]
pub async fn submit_message(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SubmitGuestbookMessageDTO>,
) -> Result<(StatusCode, Json<GuestbookMessageDTO>), AppError> {
    // 1. Author and message are required, stored trimmed
    // 2. An invitation code links the message to its guest (404 when unknown)
    // 3. Store unapproved: nothing is public before moderation
    // 4. Notify the admin console

    body.validate()?;

    let (Some(author_name), Some(message)) =
        (blank_to_none(&body.author_name), blank_to_none(&body.message))
    else {
        warn!("Empty author or message");
        return Err(AppError::bad_request("Name and message are required"));
    };

    let guest_id = match body.invitation_code.as_deref().and_then(blank_to_none) {
        Some(code) => {
            let guest = state
                .guest
                .find_by_invitation_code(&code)
                .await?
                .ok_or_else(|| AppError::not_found("Invalid invitation code"))?;
            Some(guest.guest_id)
        }
        None => None,
    };

    let created = state
        .guestbook
        .create(&CreateGuestbookMessageDTO {
            guest_id,
            author_name,
            message,
        })
        .await?;

    state.changes.publish(ChangeEvent {
        table: ChangedTable::GuestbookMessages,
        action: ChangeAction::Insert,
        id: Some(created.message_id),
    });

    info!(message_id = created.message_id, "Guestbook message awaiting moderation");
    Ok((StatusCode::CREATED, Json(GuestbookMessageDTO::from(created))))
}

/// Approved messages only, newest first
#[instrument(skip(state))]
pub async fn list_public_messages(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GuestbookFeedQuery>,
) -> Result<Json<Vec<GuestbookMessageDTO>>, AppError> {
    let messages = state.guestbook.list_approved(query.page_size()).await?;

    Ok(Json(messages.into_iter().map(GuestbookMessageDTO::from).collect()))
}

#[instrument(skip(state, query), fields(status = ?query.status))]
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ModerationQuery>,
) -> Result<Json<ModerationListDTO>, AppError> {
    let messages = state.guestbook.list_all().await?;
    debug!("Moderation list over {} messages", messages.len());

    Ok(Json(ModerationListDTO::build(messages, query.status)))
}

/// Shared by approve and reject
async fn set_approval(
    state: &AppState,
    message_id: i64,
    approved: bool,
) -> Result<GuestbookMessageDTO, AppError> {
    let (message, changed) = state.guestbook.set_approved(&message_id, approved).await?;
    let message = GuestbookMessageDTO::from(message);

    if !changed {
        debug!(approved, "Moderation flag already set");
        return Ok(message);
    }

    state.changes.publish(ChangeEvent {
        table: ChangedTable::GuestbookMessages,
        action: ChangeAction::Update,
        id: Some(message_id),
    });
    // the public page only ever sees a message once, when it goes live
    if approved {
        state.changes.publish_approved(message.clone());
    }

    info!(approved, "Message moderated");
    Ok(message)
}

#[instrument(skip(state))]
pub async fn approve_message(
    State(state): State<Arc<AppState>>,
    Path(message_id): Path<i64>,
) -> Result<Json<GuestbookMessageDTO>, AppError> {
    Ok(Json(set_approval(&state, message_id, true).await?))
}

/// Hides the message again, it is not deleted
#[instrument(skip(state))]
pub async fn reject_message(
    State(state): State<Arc<AppState>>,
    Path(message_id): Path<i64>,
) -> Result<Json<GuestbookMessageDTO>, AppError> {
    Ok(Json(set_approval(&state, message_id, false).await?))
}

#[instrument(skip(state))]
pub async fn delete_message(
    State(state): State<Arc<AppState>>,
    Path(message_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.guestbook.delete(&message_id).await?;

    state.changes.publish(ChangeEvent {
        table: ChangedTable::GuestbookMessages,
        action: ChangeAction::Delete,
        id: Some(message_id),
    });

    info!("Message deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn export_messages(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    let messages = state.guestbook.list_all().await?;

    Ok(csv_attachment("livre-dor.csv", csv::guestbook_csv(&messages)))
}
