//! Blood request entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use hemolink_core::AppResult;

use super::blood_type::BloodType;
use super::requester::RequesterRef;
use super::status::RequestStatus;
use super::urgency::UrgencyLevel;

/// A request for blood donation.
///
/// Rows are never physically deleted; cancellation is a terminal status,
/// which preserves the audit trail. Status and `matched_donor_id` are
/// mutated only through the lifecycle service's conditional transitions.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BloodRequest {
    /// Unique request identifier.
    pub id: Uuid,
    /// Requesting patient, if requested by a patient.
    pub patient_id: Option<Uuid>,
    /// Requesting institution, if requested by an institution.
    pub institution_id: Option<Uuid>,
    /// Required blood type.
    pub blood_type: BloodType,
    /// Units needed (always >= 1).
    pub units: i32,
    /// Urgency level.
    pub urgency: UrgencyLevel,
    /// Date by which the blood is required.
    pub required_by: NaiveDate,
    /// Free-text notes from the requester.
    pub notes: Option<String>,
    /// Latitude of the requester (0.0 if unset).
    pub latitude: f64,
    /// Longitude of the requester (0.0 if unset).
    pub longitude: f64,
    /// Current lifecycle status.
    pub status: RequestStatus,
    /// The matched donor, set while status is Matched/Accepted/Fulfilled.
    pub matched_donor_id: Option<Uuid>,
    /// When the request was created.
    pub created_at: DateTime<Utc>,
}

impl BloodRequest {
    /// The requester as a sum type, re-checking the exactly-one invariant.
    pub fn requester(&self) -> AppResult<RequesterRef> {
        RequesterRef::from_columns(self.patient_id, self.institution_id)
    }

    /// Whether the request has reached a terminal status.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}
