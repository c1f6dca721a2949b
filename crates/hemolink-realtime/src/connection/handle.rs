//! Individual WebSocket channel handle.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use uuid::Uuid;

use hemolink_entity::notification::Recipient;
use hemolink_entity::user::UserRole;

use crate::message::types::OutboundMessage;

/// Unique channel identifier
pub type ChannelId = Uuid;

/// A handle to a single WebSocket channel.
///
/// Holds the sender half for pushing messages to the client, plus the
/// verified identity the channel was registered under.
#[derive(Debug)]
pub struct ChannelHandle {
    /// Unique channel ID
    pub id: ChannelId,
    /// Verified recipient identity this channel delivers to
    pub recipient: Recipient,
    /// Role of the connected user (cached for quick checks)
    pub role: UserRole,
    /// Display name (cached for logging)
    pub name: String,
    /// Sender for outbound messages
    pub sender: mpsc::Sender<OutboundMessage>,
    /// When the channel was registered
    pub connected_at: DateTime<Utc>,
    /// Whether the channel is still alive
    pub alive: AtomicBool,
}

impl ChannelHandle {
    /// Create a new channel handle
    pub fn new(
        recipient: Recipient,
        role: UserRole,
        name: String,
        sender: mpsc::Sender<OutboundMessage>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            recipient,
            role,
            name,
            sender,
            connected_at: Utc::now(),
            alive: AtomicBool::new(true),
        }
    }

    /// Push an outbound message to this channel.
    ///
    /// Never blocks. A full buffer drops the message, a closed receiver
    /// marks the channel dead. Returns whether the message was enqueued.
    pub fn push(&self, msg: OutboundMessage) -> bool {
        if !self.is_alive() {
            return false;
        }
        match self.sender.try_send(msg) {
            Ok(_) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!("Channel {} send buffer full, dropping message", self.id);
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.mark_dead();
                false
            }
        }
    }

    /// Check if the channel is alive
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Mark the channel as dead
    pub fn mark_dead(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }
}
