//! GuestbookMessageRepository - Guestbook messages and their moderation flag

use super::{Create, Delete, PoolType, Read};
use crate::dtos::CreateGuestbookMessageDTO;
use crate::entities::GuestbookMessage;
use chrono::Utc;
use sqlx::Error;
use tracing::instrument;

const MESSAGE_COLUMNS: &str = "message_id, guest_id, author_name, message, is_approved, created_at";

pub struct GuestbookMessageRepository {
    connection_pool: PoolType,
}

impl GuestbookMessageRepository {
    pub fn new(connection_pool: PoolType) -> Self {
        Self { connection_pool }
    }

    /// Public feed: approved messages only, newest first
    pub async fn list_approved(&self, limit: i64) -> Result<Vec<GuestbookMessage>, Error> {
        let messages = sqlx::query_as::<_, GuestbookMessage>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM guestbook_messages
             WHERE is_approved = 1
             ORDER BY created_at DESC, message_id DESC
             LIMIT ?"
        ))
        .bind(limit)
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(messages)
    }

    /// Every message regardless of moderation state, newest first
    pub async fn list_all(&self) -> Result<Vec<GuestbookMessage>, Error> {
        let messages = sqlx::query_as::<_, GuestbookMessage>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM guestbook_messages ORDER BY created_at DESC, message_id DESC"
        ))
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(messages)
    }

    pub async fn count(&self) -> Result<i64, Error> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM guestbook_messages")
            .fetch_one(&self.connection_pool)
            .await?;

        Ok(count)
    }

    /// Sets the moderation flag and returns the message along with whether
    /// the flag actually changed. Setting the value it already has is a no-op.
    #[instrument(skip(self))]
    pub async fn set_approved(
        &self,
        id: &i64,
        approved: bool,
    ) -> Result<(GuestbookMessage, bool), Error> {
        let result = sqlx::query(
            "UPDATE guestbook_messages SET is_approved = ? WHERE message_id = ? AND is_approved <> ?",
        )
        .bind(approved)
        .bind(id)
        .bind(approved)
        .execute(&self.connection_pool)
        .await?;

        let message = self.read(id).await?.ok_or(Error::RowNotFound)?;
        Ok((message, result.rows_affected() > 0))
    }
}

impl Create<GuestbookMessage, CreateGuestbookMessageDTO> for GuestbookMessageRepository {
    /// New messages always start unapproved
    async fn create(&self, data: &CreateGuestbookMessageDTO) -> Result<GuestbookMessage, Error> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO guestbook_messages (guest_id, author_name, message, is_approved, created_at)
            VALUES (?, ?, ?, 0, ?)
            "#,
        )
        .bind(data.guest_id)
        .bind(&data.author_name)
        .bind(&data.message)
        .bind(now)
        .execute(&self.connection_pool)
        .await?;

        Ok(GuestbookMessage {
            message_id: result.last_insert_rowid(),
            guest_id: data.guest_id,
            author_name: data.author_name.clone(),
            message: data.message.clone(),
            is_approved: false,
            created_at: now,
        })
    }
}

impl Read<GuestbookMessage, i64> for GuestbookMessageRepository {
    async fn read(&self, id: &i64) -> Result<Option<GuestbookMessage>, Error> {
        let message = sqlx::query_as::<_, GuestbookMessage>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM guestbook_messages WHERE message_id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(message)
    }
}

impl Delete<i64> for GuestbookMessageRepository {
    async fn delete(&self, id: &i64) -> Result<(), Error> {
        let result = sqlx::query("DELETE FROM guestbook_messages WHERE message_id = ?")
            .bind(id)
            .execute(&self.connection_pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::RowNotFound);
        }

        Ok(())
    }
}
