use crate::dtos::{ChangeEvent, GuestbookMessageDTO, WsEventDTO};
use crate::ws::BROADCAST_CHANNEL_CAPACITY;
use tokio::sync::broadcast::{self, Receiver, Sender};
use tracing::{debug, instrument};

/// Fan-out of the realtime notifications.
///
/// Two independent broadcast channels: every mutation for the admin console,
/// and approved guestbook messages for the public page. Publishing never
/// blocks; with nobody subscribed the event is simply dropped.
pub struct ChangeFeed {
    changes: Sender<WsEventDTO>,
    approved: Sender<WsEventDTO>,
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeFeed {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(BROADCAST_CHANNEL_CAPACITY);
        let (approved, _) = broadcast::channel(BROADCAST_CHANNEL_CAPACITY);
        ChangeFeed { changes, approved }
    }

    pub fn subscribe(&self) -> Receiver<WsEventDTO> {
        self.changes.subscribe()
    }

    pub fn subscribe_approved(&self) -> Receiver<WsEventDTO> {
        self.approved.subscribe()
    }

    /// Returns the number of subscribers reached
    #[instrument(skip(self))]
    pub fn publish(&self, event: ChangeEvent) -> usize {
        let receivers = self.changes.send(WsEventDTO::Change(event)).unwrap_or(0);
        debug!(receivers, "Change event published");
        receivers
    }

    #[instrument(skip(self, message), fields(message_id = message.message_id))]
    pub fn publish_approved(&self, message: GuestbookMessageDTO) -> usize {
        let receivers = self
            .approved
            .send(WsEventDTO::MessageApproved(message))
            .unwrap_or(0);
        debug!(receivers, "Approved message published");
        receivers
    }
}
