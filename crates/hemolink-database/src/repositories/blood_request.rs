//! Blood request repository implementation.
//!
//! All state transitions are single conditional `UPDATE … WHERE status =
//! expected RETURNING *` statements. `Ok(None)` from a transition means
//! the precondition no longer held when the statement committed — the
//! row was either absent or already moved by a concurrent writer. The
//! caller distinguishes the two with [`BloodRequestRepository::find_by_id`].

use sqlx::PgPool;
use uuid::Uuid;

use hemolink_core::error::{AppError, ErrorKind};
use hemolink_core::result::AppResult;
use hemolink_core::types::pagination::{PageRequest, PageResponse};
use hemolink_entity::blood_request::{BloodRequest, RequesterRef};

/// Repository for blood request rows.
#[derive(Debug, Clone)]
pub struct BloodRequestRepository {
    pool: PgPool,
}

/// Insert parameters for a new request.
#[derive(Debug, Clone)]
pub struct NewBloodRequest {
    /// The requesting party.
    pub requester: RequesterRef,
    /// Required blood type.
    pub blood_type: hemolink_entity::blood_request::BloodType,
    /// Units needed.
    pub units: i32,
    /// Urgency level.
    pub urgency: hemolink_entity::blood_request::UrgencyLevel,
    /// Date by which the blood is required.
    pub required_by: chrono::NaiveDate,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Latitude (0.0 if unset).
    pub latitude: f64,
    /// Longitude (0.0 if unset).
    pub longitude: f64,
}

impl BloodRequestRepository {
    /// Create a new blood request repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new request with status `pending`.
    pub async fn create(&self, req: &NewBloodRequest) -> AppResult<BloodRequest> {
        let (patient_id, institution_id) = req.requester.into_columns();

        sqlx::query_as::<_, BloodRequest>(
            "INSERT INTO blood_requests \
             (patient_id, institution_id, blood_type, units, urgency, required_by, notes, latitude, longitude) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(patient_id)
        .bind(institution_id)
        .bind(req.blood_type)
        .bind(req.units)
        .bind(req.urgency)
        .bind(req.required_by)
        .bind(&req.notes)
        .bind(req.latitude)
        .bind(req.longitude)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create blood request", e))
    }

    /// Find a request by id.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<BloodRequest>> {
        sqlx::query_as::<_, BloodRequest>("SELECT * FROM blood_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find blood request", e)
            })
    }

    /// List requests submitted by a requester, newest first.
    pub async fn find_by_requester(
        &self,
        requester: RequesterRef,
        page: &PageRequest,
    ) -> AppResult<PageResponse<BloodRequest>> {
        let (patient_id, institution_id) = requester.into_columns();

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM blood_requests \
             WHERE patient_id IS NOT DISTINCT FROM $1 AND institution_id IS NOT DISTINCT FROM $2",
        )
        .bind(patient_id)
        .bind(institution_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count requests", e))?;

        let rows = sqlx::query_as::<_, BloodRequest>(
            "SELECT * FROM blood_requests \
             WHERE patient_id IS NOT DISTINCT FROM $1 AND institution_id IS NOT DISTINCT FROM $2 \
             ORDER BY created_at DESC LIMIT $3 OFFSET $4",
        )
        .bind(patient_id)
        .bind(institution_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list requests", e))?;

        Ok(PageResponse::new(
            rows,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Claim a pending request for a donor: `pending → matched`.
    ///
    /// `None` if the request is absent or no longer pending — under
    /// concurrent accepts exactly one caller gets `Some`.
    pub async fn try_claim(&self, id: Uuid, donor_id: Uuid) -> AppResult<Option<BloodRequest>> {
        sqlx::query_as::<_, BloodRequest>(
            "UPDATE blood_requests SET status = 'matched', matched_donor_id = $2 \
             WHERE id = $1 AND status = 'pending' RETURNING *",
        )
        .bind(id)
        .bind(donor_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to claim request", e))
    }

    /// Donor confirmation: `matched → accepted`, only by the matched donor.
    pub async fn try_confirm(&self, id: Uuid, donor_id: Uuid) -> AppResult<Option<BloodRequest>> {
        sqlx::query_as::<_, BloodRequest>(
            "UPDATE blood_requests SET status = 'accepted' \
             WHERE id = $1 AND status = 'matched' AND matched_donor_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(donor_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to confirm request", e))
    }

    /// Donor rejection: `matched → pending`, clearing the matched donor.
    pub async fn try_release(&self, id: Uuid, donor_id: Uuid) -> AppResult<Option<BloodRequest>> {
        sqlx::query_as::<_, BloodRequest>(
            "UPDATE blood_requests SET status = 'pending', matched_donor_id = NULL \
             WHERE id = $1 AND status = 'matched' AND matched_donor_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(donor_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to release request", e))
    }

    /// Requester cancellation, permitted from `pending` or `matched`.
    ///
    /// Clears `matched_donor_id`; the column is populated only while the
    /// status is matched, accepted, or fulfilled.
    pub async fn try_cancel(&self, id: Uuid) -> AppResult<Option<BloodRequest>> {
        sqlx::query_as::<_, BloodRequest>(
            "UPDATE blood_requests SET status = 'cancelled', matched_donor_id = NULL \
             WHERE id = $1 AND status IN ('pending', 'matched') RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to cancel request", e))
    }

    /// Completion: `accepted → fulfilled`.
    pub async fn try_fulfill(&self, id: Uuid) -> AppResult<Option<BloodRequest>> {
        sqlx::query_as::<_, BloodRequest>(
            "UPDATE blood_requests SET status = 'fulfilled' \
             WHERE id = $1 AND status = 'accepted' RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to fulfill request", e))
    }
}
