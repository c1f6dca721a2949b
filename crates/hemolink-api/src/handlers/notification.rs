//! Notification feed endpoints.

use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;
use uuid::Uuid;

use hemolink_core::types::pagination::PageResponse;
use hemolink_entity::notification::Notification;

use crate::dto::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, Pagination};
use crate::state::AppState;

/// Body of the unread count response.
#[derive(Debug, Serialize)]
pub struct UnreadCount {
    /// Number of unread notifications.
    pub count: i64,
}

/// GET /api/notifications — the caller's feed, newest first
pub async fn list_notifications(
    State(state): State<AppState>,
    user: AuthUser,
    Pagination(page): Pagination,
) -> Result<Json<ApiResponse<PageResponse<Notification>>>, ApiError> {
    let notifications = state.notifications.list(user.context(), &page).await?;
    Ok(Json(ApiResponse::ok(notifications)))
}

/// GET /api/notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ApiResponse<UnreadCount>>, ApiError> {
    let count = state.notifications.unread_count(user.context()).await?;
    Ok(Json(ApiResponse::ok(UnreadCount { count })))
}

/// PUT /api/notifications/:id — mark as read (idempotent)
pub async fn mark_read(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Notification>>, ApiError> {
    let notification = state.notifications.mark_read(user.context(), id).await?;
    Ok(Json(ApiResponse::ok(notification)))
}
