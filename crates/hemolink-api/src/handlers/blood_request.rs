//! Blood request endpoints.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use hemolink_core::error::AppError;
use hemolink_core::types::pagination::PageResponse;
use hemolink_entity::blood_request::BloodRequest;

use crate::dto::{ApiResponse, CreateBloodRequestBody};
use crate::error::ApiError;
use crate::extractors::{AuthUser, Pagination};
use crate::state::AppState;

/// POST /api/blood-requests — submit a new request
pub async fn create_request(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<CreateBloodRequestBody>,
) -> Result<(StatusCode, Json<ApiResponse<BloodRequest>>), ApiError> {
    body.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let request = state
        .lifecycle
        .create_request(user.context(), body.into())
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(request))))
}

/// GET /api/blood-requests/:id
pub async fn get_request(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<BloodRequest>>, ApiError> {
    let request = state.lifecycle.get_request(id).await?;
    Ok(Json(ApiResponse::ok(request)))
}

/// GET /api/blood-requests — the caller's own requests, newest first
pub async fn list_requests(
    State(state): State<AppState>,
    user: AuthUser,
    Pagination(page): Pagination,
) -> Result<Json<ApiResponse<PageResponse<BloodRequest>>>, ApiError> {
    let requests = state.lifecycle.list_requests(user.context(), &page).await?;
    Ok(Json(ApiResponse::ok(requests)))
}

/// PUT /api/blood-requests/:id/accept — donor claims or confirms
pub async fn accept_request(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<BloodRequest>>, ApiError> {
    let request = state.lifecycle.accept_request(user.context(), id).await?;
    Ok(Json(ApiResponse::ok(request)))
}

/// PUT /api/blood-requests/:id/reject — matched donor withdraws
pub async fn reject_request(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<BloodRequest>>, ApiError> {
    let request = state.lifecycle.reject_request(user.context(), id).await?;
    Ok(Json(ApiResponse::ok(request)))
}

/// PUT /api/blood-requests/:id/cancel — requester withdraws the request
pub async fn cancel_request(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<BloodRequest>>, ApiError> {
    let request = state.lifecycle.cancel_request(user.context(), id).await?;
    Ok(Json(ApiResponse::ok(request)))
}

/// PUT /api/blood-requests/:id/fulfill — record the completed donation
pub async fn fulfill_request(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<BloodRequest>>, ApiError> {
    let request = state.lifecycle.fulfill_request(user.context(), id).await?;
    Ok(Json(ApiResponse::ok(request)))
}
