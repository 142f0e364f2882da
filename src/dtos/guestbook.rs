//! Guestbook DTOs - Data Transfer Objects for guestbook messages and moderation

use crate::entities::GuestbookMessage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Default and maximum page size of the public feed
pub const PUBLIC_FEED_PAGE_SIZE: i64 = 10;
pub const PUBLIC_FEED_MAX_PAGE_SIZE: i64 = 50;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GuestbookMessageDTO {
    pub message_id: i64,
    pub guest_id: Option<i64>,
    pub author_name: String,
    pub message: String,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
}

impl From<GuestbookMessage> for GuestbookMessageDTO {
    fn from(value: GuestbookMessage) -> Self {
        Self {
            message_id: value.message_id,
            guest_id: value.guest_id,
            author_name: value.author_name,
            message: value.message,
            is_approved: value.is_approved,
            created_at: value.created_at,
        }
    }
}

/// Body of the public guestbook form
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct SubmitGuestbookMessageDTO {
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub author_name: String,

    #[validate(length(max = 2000, message = "Message must be at most 2000 characters"))]
    pub message: String,

    /// Links the message to the guest holding this code
    #[serde(default)]
    pub invitation_code: Option<String>,
}

/// DTO to insert a message (without message_id); always stored unapproved
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CreateGuestbookMessageDTO {
    pub guest_id: Option<i64>,
    pub author_name: String,
    pub message: String,
}

/// /guestbook?limit=20
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct GuestbookFeedQuery {
    #[serde(default)]
    pub limit: Option<i64>,
}

impl GuestbookFeedQuery {
    pub fn page_size(&self) -> i64 {
        self.limit
            .unwrap_or(PUBLIC_FEED_PAGE_SIZE)
            .clamp(1, PUBLIC_FEED_MAX_PAGE_SIZE)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ModerationFilter {
    #[default]
    All,
    Pending,
    Approved,
}

impl ModerationFilter {
    pub fn matches(&self, message: &GuestbookMessage) -> bool {
        match self {
            ModerationFilter::All => true,
            ModerationFilter::Pending => !message.is_approved,
            ModerationFilter::Approved => message.is_approved,
        }
    }
}

/// /admin/guestbook?status=pending
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct ModerationQuery {
    #[serde(default)]
    pub status: ModerationFilter,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ModerationCountsDTO {
    pub all: usize,
    pub pending: usize,
    pub approved: usize,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ModerationListDTO {
    pub counts: ModerationCountsDTO,
    pub messages: Vec<GuestbookMessageDTO>,
}

impl ModerationListDTO {
    /// Counts are always over every message, the list is filtered
    pub fn build(messages: Vec<GuestbookMessage>, filter: ModerationFilter) -> Self {
        let approved = messages.iter().filter(|m| m.is_approved).count();
        let counts = ModerationCountsDTO {
            all: messages.len(),
            pending: messages.len() - approved,
            approved,
        };

        let messages = messages
            .into_iter()
            .filter(|m| filter.matches(m))
            .map(GuestbookMessageDTO::from)
            .collect();

        Self { counts, messages }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(id: i64, approved: bool) -> GuestbookMessage {
        GuestbookMessage {
            message_id: id,
            guest_id: None,
            author_name: format!("author {id}"),
            message: "Bravo".to_string(),
            is_approved: approved,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn page_size_is_bounded() {
        assert_eq!(GuestbookFeedQuery::default().page_size(), 10);
        assert_eq!(GuestbookFeedQuery { limit: Some(500) }.page_size(), 50);
        assert_eq!(GuestbookFeedQuery { limit: Some(0) }.page_size(), 1);
    }

    #[test]
    fn moderation_list_counts_everything_but_lists_the_filter() {
        let messages = vec![message(1, true), message(2, false), message(3, false)];

        let list = ModerationListDTO::build(messages, ModerationFilter::Pending);

        assert_eq!(
            list.counts,
            ModerationCountsDTO {
                all: 3,
                pending: 2,
                approved: 1
            }
        );
        assert_eq!(list.messages.len(), 2);
        assert!(list.messages.iter().all(|m| !m.is_approved));
    }
}
