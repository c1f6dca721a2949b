//! Notification repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use hemolink_core::error::{AppError, ErrorKind};
use hemolink_core::result::AppResult;
use hemolink_core::types::pagination::{PageRequest, PageResponse};
use hemolink_entity::notification::Notification;
use hemolink_entity::notification::recipient::{Recipient, RecipientType};

/// Repository for notification rows.
///
/// Notification rows are append-only apart from the `is_read` flag, so
/// writers need no cross-writer coordination.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a notification row.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        recipient: Recipient,
        event_type: &str,
        title: &str,
        message: &str,
        request_id: Option<Uuid>,
        match_donor_id: Option<Uuid>,
    ) -> AppResult<Notification> {
        sqlx::query_as::<_, Notification>(
            "INSERT INTO notifications \
             (recipient_type, recipient_id, event_type, title, message, request_id, match_donor_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(recipient.recipient_type)
        .bind(recipient.recipient_id)
        .bind(event_type)
        .bind(title)
        .bind(message)
        .bind(request_id)
        .bind(match_donor_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create notification", e))
    }

    /// List notifications for a recipient, newest first.
    pub async fn find_by_recipient(
        &self,
        recipient_type: RecipientType,
        recipient_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE recipient_type = $1 AND recipient_id = $2",
        )
        .bind(recipient_type)
        .bind(recipient_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count notifications", e)
        })?;

        let rows = sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE recipient_type = $1 AND recipient_id = $2 \
             ORDER BY created_at DESC LIMIT $3 OFFSET $4",
        )
        .bind(recipient_type)
        .bind(recipient_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list notifications", e)
        })?;

        Ok(PageResponse::new(
            rows,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Find a notification by id.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Notification>> {
        sqlx::query_as::<_, Notification>("SELECT * FROM notifications WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find notification", e)
            })
    }

    /// Mark a notification as read, returning the updated row.
    ///
    /// Idempotent: marking an already-read notification returns the row
    /// unchanged. `None` means the id does not exist.
    pub async fn mark_read(&self, id: Uuid) -> AppResult<Option<Notification>> {
        sqlx::query_as::<_, Notification>(
            "UPDATE notifications SET is_read = TRUE WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark read", e))
    }

    /// Count unread notifications for a recipient.
    pub async fn count_unread(
        &self,
        recipient_type: RecipientType,
        recipient_id: Uuid,
    ) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM notifications \
             WHERE recipient_type = $1 AND recipient_id = $2 AND is_read = FALSE",
        )
        .bind(recipient_type)
        .bind(recipient_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count unread", e))
    }
}
