//! Fan-out dispatcher — persists notifications, then pushes best-effort.

use std::sync::Arc;

use uuid::Uuid;

use hemolink_core::AppResult;
use hemolink_database::repositories::NotificationRepository;
use hemolink_entity::notification::{Notification, Recipient};

use crate::connection::registry::SessionRegistry;
use crate::message::types::OutboundMessage;

/// Delivers notifications to recipients.
///
/// Every notification is persisted before any push is attempted, so a
/// recipient with no live channel still finds it in their feed. Push
/// failures are logged and swallowed; only persistence failures
/// propagate to the caller.
#[derive(Debug, Clone)]
pub struct FanoutDispatcher {
    /// Notification persistence.
    notifications: Arc<NotificationRepository>,
    /// Live channel index.
    registry: Arc<SessionRegistry>,
}

impl FanoutDispatcher {
    /// Create a new dispatcher.
    pub fn new(notifications: Arc<NotificationRepository>, registry: Arc<SessionRegistry>) -> Self {
        Self {
            notifications,
            registry,
        }
    }

    /// Persist a notification and push it to the recipient's live channels.
    ///
    /// Admin-addressed notifications are persisted once and broadcast to
    /// every connected administrator. Returns the persisted row.
    pub async fn notify(
        &self,
        recipient: Recipient,
        event_type: &str,
        title: &str,
        message: &str,
        request_id: Option<Uuid>,
        match_donor_id: Option<Uuid>,
    ) -> AppResult<Notification> {
        let notification = self
            .notifications
            .create(recipient, event_type, title, message, request_id, match_donor_id)
            .await?;

        let delivered = self
            .registry
            .push(&recipient, &OutboundMessage::from_notification(&notification));
        tracing::debug!(
            "Notification {} ({}) delivered to {} live channel(s) of {}:{}",
            notification.id,
            event_type,
            delivered,
            recipient.recipient_type,
            recipient.recipient_id
        );

        Ok(notification)
    }

    /// Push a transient message to a recipient's live channels.
    ///
    /// Nothing is persisted; recipients without a live channel miss it.
    pub fn push(&self, recipient: &Recipient, msg: &OutboundMessage) -> usize {
        self.registry.push(recipient, msg)
    }

    /// Access the underlying session registry.
    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }
}
