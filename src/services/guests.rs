//! Guest services - Administrative management of the guest directory

use crate::core::{AppError, AppState};
use crate::csv;
use crate::dtos::{
    ChangeAction, ChangeEvent, ChangedTable, CreateGuestDTO, GuestDTO, GuestSearchQuery,
    ImportReportDTO, UpdateGuestDTO, blank_to_none,
};
use crate::entities::{Guest, GuestCategory};
use crate::repositories::{Create, Delete, Read, Update};
use crate::services::csv_attachment;
use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_macros::debug_handler;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

lazy_static! {
    static ref INVITATION_CODE_RE: Regex = Regex::new(r"^[A-Za-z0-9_-]{2,32}$").unwrap();
}

/// Body of POST /admin/guests (extends CreateGuestDTO with optional code and defaults)
#[derive(Deserialize, Debug, Validate)]
pub struct CreateGuestRequestDTO {
    #[serde(default)]
    pub invitation_code: Option<String>,

    #[validate(length(max = 100, message = "First name must be at most 100 characters"))]
    pub first_name: String,

    #[validate(length(max = 100, message = "Last name must be at most 100 characters"))]
    pub last_name: String,

    #[serde(default)]
    #[validate(length(max = 40))]
    pub phone: Option<String>,

    #[serde(default)]
    #[validate(length(max = 254))]
    pub email: Option<String>,

    #[serde(default)]
    pub category: Option<GuestCategory>,

    #[serde(default)]
    #[validate(range(min = 1, max = 20, message = "Adults must be between 1 and 20"))]
    pub num_adults: Option<i32>,

    #[serde(default)]
    #[validate(range(min = 0, max = 20, message = "Children must be between 0 and 20"))]
    pub num_children: Option<i32>,
}

fn matches_search(guest: &Guest, needle: &str) -> bool {
    [&guest.first_name, &guest.last_name, &guest.invitation_code]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

#[instrument(skip(state, query), fields(search = ?query.search))]
pub async fn list_guests(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GuestSearchQuery>,
) -> Result<Json<Vec<GuestDTO>>, AppError> {
    // 1. Load every guest, newest first
    // 2. Apply the optional case-insensitive search on names and code (in memory)

    let guests = state.guest.list_all().await?;

    let guests: Vec<GuestDTO> = match query.search.as_deref().and_then(blank_to_none) {
        Some(needle) => {
            let needle = needle.to_lowercase();
            guests
                .into_iter()
                .filter(|g| matches_search(g, &needle))
                .map(GuestDTO::from)
                .collect()
        }
        None => guests.into_iter().map(GuestDTO::from).collect(),
    };

    debug!("Returning {} guests", guests.len());
    Ok(Json(guests))
}

#[instrument(skip(state))]
pub async fn get_guest(
    State(state): State<Arc<AppState>>,
    Path(guest_id): Path<i64>,
) -> Result<Json<GuestDTO>, AppError> {
    let guest = state
        .guest
        .read(&guest_id)
        .await?
        .ok_or_else(|| AppError::not_found("Guest not found"))?;

    Ok(Json(GuestDTO::from(guest)))
}

#[debug_handler]
#[instrument(skip(state, body))]
pub async fn create_guest(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateGuestRequestDTO>,
) -> Result<(StatusCode, Json<GuestDTO>), AppError> {
    // 1. Validate lengths and headcount, names must not be blank
    // 2. Use the supplied code (format checked) or generate the next sequential one
    // 3. Insert; a code already in use surfaces as CONFLICT
    // 4. Notify the admin console

    body.validate()?;

    let (Some(first_name), Some(last_name)) =
        (blank_to_none(&body.first_name), blank_to_none(&body.last_name))
    else {
        warn!("Guest without first or last name");
        return Err(AppError::bad_request("First and last name are required"));
    };

    let invitation_code = match body.invitation_code.as_deref().and_then(blank_to_none) {
        Some(code) => {
            if !INVITATION_CODE_RE.is_match(&code) {
                warn!("Invalid invitation code format");
                return Err(AppError::bad_request("Invalid invitation code").with_details(
                    "2 to 32 characters among letters, digits, '-' and '_'",
                ));
            }
            code
        }
        None => {
            let count = state.guest.count().await?;
            Guest::sequential_code(&state.code_prefix, count + 1)
        }
    };

    let guest = state
        .guest
        .create(&CreateGuestDTO {
            invitation_code,
            first_name,
            last_name,
            phone: body.phone.as_deref().and_then(blank_to_none),
            email: body.email.as_deref().and_then(blank_to_none),
            category: body.category.unwrap_or_default(),
            num_adults: body.num_adults.unwrap_or(1),
            num_children: body.num_children.unwrap_or(0),
        })
        .await
        .map_err(|e| match AppError::from(e) {
            err if err.status() == StatusCode::CONFLICT => {
                warn!("Invitation code already in use");
                AppError::conflict("Invitation code already in use")
            }
            err => err,
        })?;

    state.changes.publish(ChangeEvent {
        table: ChangedTable::Guests,
        action: ChangeAction::Insert,
        id: Some(guest.guest_id),
    });

    info!(guest_id = guest.guest_id, code = %guest.invitation_code, "Guest created");
    Ok((StatusCode::CREATED, Json(GuestDTO::from(guest))))
}

#[instrument(skip(state, body))]
pub async fn update_guest(
    State(state): State<Arc<AppState>>,
    Path(guest_id): Path<i64>,
    Json(body): Json<UpdateGuestDTO>,
) -> Result<Json<GuestDTO>, AppError> {
    // 1. Validate the supplied fields; names, when present, must not be blank
    // 2. Apply the partial update (404 when the guest does not exist)
    // 3. Notify the admin console

    body.validate()?;

    let blank_name = [&body.first_name, &body.last_name]
        .iter()
        .any(|name| name.as_deref().is_some_and(|n| n.trim().is_empty()));
    if blank_name {
        return Err(AppError::bad_request("First and last name cannot be blank"));
    }

    let guest = state.guest.update(&guest_id, &body).await?;

    state.changes.publish(ChangeEvent {
        table: ChangedTable::Guests,
        action: ChangeAction::Update,
        id: Some(guest_id),
    });

    info!("Guest updated");
    Ok(Json(GuestDTO::from(guest)))
}

#[instrument(skip(state))]
pub async fn delete_guest(
    State(state): State<Arc<AppState>>,
    Path(guest_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.guest.delete(&guest_id).await?;

    // the response goes with the guest
    state.changes.publish(ChangeEvent {
        table: ChangedTable::Guests,
        action: ChangeAction::Delete,
        id: Some(guest_id),
    });

    info!("Guest deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state, body), fields(bytes = body.len()))]
pub async fn import_guests(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<ImportReportDTO>, AppError> {
    // 1. Parse the CSV, continuing the sequential codes from the current count
    // 2. Insert every accepted row in a single transaction
    // 3. Notify the admin console once for the whole batch

    let count = state.guest.count().await?;
    let parsed = csv::parse_guests(&body, &state.code_prefix, count);

    let created = if parsed.guests.is_empty() {
        Vec::new()
    } else {
        state.guest.create_many(&parsed.guests).await?
    };

    if !created.is_empty() {
        state.changes.publish(ChangeEvent {
            table: ChangedTable::Guests,
            action: ChangeAction::Insert,
            id: None,
        });
    }

    info!(imported = created.len(), skipped = parsed.skipped, "Guests imported");
    Ok(Json(ImportReportDTO {
        imported: created.len(),
        skipped: parsed.skipped,
        guests: created.into_iter().map(GuestDTO::from).collect(),
    }))
}

#[instrument(skip(state))]
pub async fn export_guests(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    let guests = state.guest.list_all().await?;
    debug!("Exporting {} guests", guests.len());

    Ok(csv_attachment("invites.csv", csv::guests_csv(&guests)))
}
