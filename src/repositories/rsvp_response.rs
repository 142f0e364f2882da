//! RsvpResponseRepository - One RSVP response per guest

use super::PoolType;
use crate::dtos::UpsertRsvpDTO;
use crate::entities::RsvpResponse;
use chrono::Utc;
use sqlx::Error;
use tracing::{debug, instrument};

const RSVP_COLUMNS: &str =
    "rsvp_id, guest_id, is_attending, num_adults, num_children, remarks, responded_at";

pub struct RsvpResponseRepository {
    connection_pool: PoolType,
}

impl RsvpResponseRepository {
    pub fn new(connection_pool: PoolType) -> Self {
        Self { connection_pool }
    }

    pub async fn find_by_guest_id(&self, guest_id: &i64) -> Result<Option<RsvpResponse>, Error> {
        let response = sqlx::query_as::<_, RsvpResponse>(&format!(
            "SELECT {RSVP_COLUMNS} FROM rsvp_responses WHERE guest_id = ?"
        ))
        .bind(guest_id)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(response)
    }

    pub async fn list_all(&self) -> Result<Vec<RsvpResponse>, Error> {
        let responses = sqlx::query_as::<_, RsvpResponse>(&format!(
            "SELECT {RSVP_COLUMNS} FROM rsvp_responses ORDER BY responded_at DESC"
        ))
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(responses)
    }

    /// Insert-or-update keyed on `guest_id`, returning the stored row and
    /// whether it was created by this call.
    ///
    /// The insert and the fallback update are each a single statement, so of
    /// two concurrent first submissions exactly one reports `created`. A second
    /// submission rewrites the existing row (same `rsvp_id`) and refreshes
    /// `responded_at`.
    #[instrument(skip(self, data), fields(guest_id = data.guest_id))]
    pub async fn upsert(&self, data: &UpsertRsvpDTO) -> Result<(RsvpResponse, bool), Error> {
        let now = Utc::now();

        let inserted = sqlx::query_as::<_, RsvpResponse>(&format!(
            r#"
            INSERT INTO rsvp_responses (guest_id, is_attending, num_adults, num_children, remarks, responded_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(guest_id) DO NOTHING
            RETURNING {RSVP_COLUMNS}
            "#
        ))
        .bind(data.guest_id)
        .bind(data.is_attending)
        .bind(data.num_adults)
        .bind(data.num_children)
        .bind(&data.remarks)
        .bind(now)
        .fetch_optional(&self.connection_pool)
        .await?;

        if let Some(response) = inserted {
            debug!("RSVP created");
            return Ok((response, true));
        }

        let updated = sqlx::query_as::<_, RsvpResponse>(&format!(
            r#"
            UPDATE rsvp_responses SET
                is_attending = ?,
                num_adults   = ?,
                num_children = ?,
                remarks      = ?,
                responded_at = ?
            WHERE guest_id = ?
            RETURNING {RSVP_COLUMNS}
            "#
        ))
        .bind(data.is_attending)
        .bind(data.num_adults)
        .bind(data.num_children)
        .bind(&data.remarks)
        .bind(now)
        .bind(data.guest_id)
        .fetch_optional(&self.connection_pool)
        .await?
        .ok_or(Error::RowNotFound)?;

        debug!("RSVP updated");
        Ok((updated, false))
    }
}
