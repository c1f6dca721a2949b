//! Donor eligibility matching.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use hemolink_core::AppResult;
use hemolink_database::repositories::DonorRepository;
use hemolink_entity::blood_request::BloodType;
use hemolink_entity::donor::Donor;

/// Selects the donors a new request fans out to.
///
/// A donor is eligible when they are active, their blood type matches
/// exactly, and their last donation (if any) lies at least three months
/// in the past. The date cutoff is computed once per matching run, so
/// a single fan-out sees a consistent eligibility snapshot.
#[derive(Debug, Clone)]
pub struct DonorMatcher {
    donors: Arc<DonorRepository>,
}

impl DonorMatcher {
    /// Create a new matcher.
    pub fn new(donors: Arc<DonorRepository>) -> Self {
        Self { donors }
    }

    /// Ids of donors eligible for a request of the given blood type.
    pub async fn find_eligible(&self, blood_type: BloodType) -> AppResult<Vec<Uuid>> {
        let cutoff = Donor::donation_cutoff(Utc::now().date_naive());
        let eligible = self.donors.find_eligible(blood_type, cutoff).await?;
        tracing::debug!(
            "Matched {} eligible donor(s) for blood type {}",
            eligible.len(),
            blood_type
        );
        Ok(eligible)
    }
}
