//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::recipient::RecipientType;

/// A notification persisted for a recipient.
///
/// Created atomically with the dispatch that triggers it; append-only
/// except for the `is_read` flag.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: Uuid,
    /// Kind of recipient.
    pub recipient_type: RecipientType,
    /// The recipient's identifier.
    pub recipient_id: Uuid,
    /// Event type tag (see [`super::event`]).
    pub event_type: String,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// The blood request this notification refers to, if any.
    pub request_id: Option<Uuid>,
    /// The acting donor, when applicable.
    pub match_donor_id: Option<Uuid>,
    /// Whether the recipient has read this notification.
    pub is_read: bool,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Check if the notification is still unread.
    pub fn is_unread(&self) -> bool {
        !self.is_read
    }
}
