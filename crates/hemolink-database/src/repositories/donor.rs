//! Donor repository implementation.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use hemolink_core::error::{AppError, ErrorKind};
use hemolink_core::result::AppResult;
use hemolink_entity::blood_request::BloodType;
use hemolink_entity::donor::Donor;

/// Repository for donor projections.
#[derive(Debug, Clone)]
pub struct DonorRepository {
    pool: PgPool,
}

impl DonorRepository {
    /// Create a new donor repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a donor by id.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Donor>> {
        sqlx::query_as::<_, Donor>(
            "SELECT id, blood_type, is_active, last_donation_date FROM donors WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find donor", e))
    }

    /// Ids of donors eligible for a request of the given blood type.
    ///
    /// `cutoff` is the latest last-donation date still outside the
    /// donation-interval restriction (today minus three months).
    pub async fn find_eligible(
        &self,
        blood_type: BloodType,
        cutoff: NaiveDate,
    ) -> AppResult<Vec<Uuid>> {
        sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM donors \
             WHERE blood_type = $1 AND is_active = TRUE \
               AND (last_donation_date IS NULL OR last_donation_date <= $2)",
        )
        .bind(blood_type)
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find eligible donors", e))
    }
}
