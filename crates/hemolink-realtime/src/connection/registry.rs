//! Session registry — tracks all live channels indexed by recipient identity.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::mpsc;

use hemolink_core::config::RealtimeConfig;
use hemolink_entity::notification::{Recipient, RecipientType};
use hemolink_entity::user::UserRole;

use super::handle::{ChannelHandle, ChannelId};
use crate::message::types::OutboundMessage;

/// Thread-safe registry of all live WebSocket channels.
///
/// A recipient may hold several channels at once (one per device or tab).
/// Admin channels are additionally tracked as a shared group so that
/// admin-addressed messages reach every connected administrator.
#[derive(Debug)]
pub struct SessionRegistry {
    /// Recipient identity → list of channel handles.
    by_recipient: DashMap<Recipient, Vec<Arc<ChannelHandle>>>,
    /// Channel ID → channel handle for direct lookup.
    by_id: DashMap<ChannelId, Arc<ChannelHandle>>,
    /// Channel ID → handle for every connected administrator.
    admins: DashMap<ChannelId, Arc<ChannelHandle>>,
    /// Buffer and fan-out limits.
    config: RealtimeConfig,
}

impl SessionRegistry {
    /// Creates a new empty registry.
    pub fn new(config: RealtimeConfig) -> Self {
        Self {
            by_recipient: DashMap::new(),
            by_id: DashMap::new(),
            admins: DashMap::new(),
            config,
        }
    }

    /// Registers a channel for a verified identity.
    ///
    /// Returns the handle and the receiver half the socket task should
    /// drain. When a recipient exceeds the per-recipient channel limit
    /// the oldest channel is evicted.
    pub fn register(
        &self,
        recipient: Recipient,
        role: UserRole,
        name: String,
    ) -> (Arc<ChannelHandle>, mpsc::Receiver<OutboundMessage>) {
        let (tx, rx) = mpsc::channel(self.config.channel_buffer_size);
        let handle = Arc::new(ChannelHandle::new(recipient, role, name, tx));

        self.by_id.insert(handle.id, handle.clone());
        if recipient.recipient_type == RecipientType::Admin {
            self.admins.insert(handle.id, handle.clone());
        }

        let evicted = {
            let mut channels = self.by_recipient.entry(recipient).or_default();
            channels.push(handle.clone());
            if channels.len() > self.config.max_channels_per_recipient {
                Some(channels.remove(0))
            } else {
                None
            }
        };

        if let Some(old) = evicted {
            tracing::debug!(
                "Evicting oldest channel {} for {}:{}",
                old.id,
                recipient.recipient_type,
                recipient.recipient_id
            );
            old.mark_dead();
            self.by_id.remove(&old.id);
            self.admins.remove(&old.id);
        }

        (handle, rx)
    }

    /// Removes a channel from the registry. Idempotent.
    pub fn unregister(&self, channel_id: &ChannelId) -> Option<Arc<ChannelHandle>> {
        let (_, handle) = self.by_id.remove(channel_id)?;
        handle.mark_dead();
        self.admins.remove(channel_id);

        if let Some(mut channels) = self.by_recipient.get_mut(&handle.recipient) {
            channels.retain(|c| c.id != *channel_id);
            if channels.is_empty() {
                drop(channels);
                self.by_recipient.remove(&handle.recipient);
            }
        }
        Some(handle)
    }

    /// Gets all channels registered for a recipient.
    pub fn channels_for(&self, recipient: &Recipient) -> Vec<Arc<ChannelHandle>> {
        self.by_recipient
            .get(recipient)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Gets the channels of every connected administrator.
    pub fn admin_channels(&self) -> Vec<Arc<ChannelHandle>> {
        self.admins.iter().map(|entry| entry.value().clone()).collect()
    }

    /// Gets a specific channel by ID.
    pub fn get(&self, channel_id: &ChannelId) -> Option<Arc<ChannelHandle>> {
        self.by_id.get(channel_id).map(|entry| entry.value().clone())
    }

    /// Pushes a message to every live channel of a recipient.
    ///
    /// Admin-addressed messages are broadcast to the shared admin group.
    /// Returns the number of channels the message was enqueued on.
    pub fn push(&self, recipient: &Recipient, msg: &OutboundMessage) -> usize {
        let channels = if recipient.recipient_type == RecipientType::Admin {
            self.admin_channels()
        } else {
            self.channels_for(recipient)
        };

        channels
            .iter()
            .filter(|handle| handle.push(msg.clone()))
            .count()
    }

    /// Returns the total number of live channels.
    pub fn channel_count(&self) -> usize {
        self.by_id.len()
    }

    /// Returns the number of distinct connected recipients.
    pub fn recipient_count(&self) -> usize {
        self.by_recipient.len()
    }
}
