//! Notification feed service.

use std::sync::Arc;

use uuid::Uuid;

use hemolink_core::types::pagination::{PageRequest, PageResponse};
use hemolink_core::{AppError, AppResult};
use hemolink_database::repositories::NotificationRepository;
use hemolink_entity::notification::Notification;

/// Read-side operations on a recipient's notification feed.
#[derive(Debug, Clone)]
pub struct NotificationService {
    notifications: Arc<NotificationRepository>,
}

impl NotificationService {
    /// Create a new notification service.
    pub fn new(notifications: Arc<NotificationRepository>) -> Self {
        Self { notifications }
    }

    /// List the caller's feed, newest first.
    pub async fn list(
        &self,
        ctx: &crate::context::RequestContext,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        let recipient = ctx.feed_recipient();
        self.notifications
            .find_by_recipient(recipient.recipient_type, recipient.recipient_id, page)
            .await
    }

    /// Count the caller's unread notifications.
    pub async fn unread_count(&self, ctx: &crate::context::RequestContext) -> AppResult<i64> {
        let recipient = ctx.feed_recipient();
        self.notifications
            .count_unread(recipient.recipient_type, recipient.recipient_id)
            .await
    }

    /// Mark one of the caller's notifications as read.
    ///
    /// Idempotent: an already-read notification is returned unchanged.
    /// Marking a notification outside the caller's feed is an
    /// authorization error.
    pub async fn mark_read(
        &self,
        ctx: &crate::context::RequestContext,
        id: Uuid,
    ) -> AppResult<Notification> {
        let existing = self
            .notifications
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Notification not found"))?;

        let recipient = ctx.feed_recipient();
        let owned = existing.recipient_type == recipient.recipient_type
            && existing.recipient_id == recipient.recipient_id;
        if !owned && !ctx.is_admin() {
            return Err(AppError::authorization("Not the recipient of this notification"));
        }

        self.notifications
            .mark_read(id)
            .await?
            .ok_or_else(|| AppError::not_found("Notification not found"))
    }
}
