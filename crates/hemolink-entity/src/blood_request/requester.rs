//! Requester reference sum type.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hemolink_core::AppError;

use crate::notification::recipient::RecipientType;

/// The party that submitted a blood request.
///
/// Exactly one of patient or institution — the sum type makes the
/// "never both, never neither" invariant unrepresentable in memory.
/// Rows store the two nullable columns; conversion re-checks the
/// invariant at the storage boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum RequesterRef {
    /// An individual patient.
    Patient(Uuid),
    /// A healthcare institution.
    Institution(Uuid),
}

impl RequesterRef {
    /// Build from the nullable row columns, enforcing exactly-one.
    pub fn from_columns(
        patient_id: Option<Uuid>,
        institution_id: Option<Uuid>,
    ) -> Result<Self, AppError> {
        match (patient_id, institution_id) {
            (Some(p), None) => Ok(Self::Patient(p)),
            (None, Some(i)) => Ok(Self::Institution(i)),
            (Some(_), Some(_)) => Err(AppError::validation(
                "Request must name a patient or an institution, not both",
            )),
            (None, None) => Err(AppError::validation(
                "Request must name a patient or an institution",
            )),
        }
    }

    /// Split into the nullable row columns `(patient_id, institution_id)`.
    pub fn into_columns(self) -> (Option<Uuid>, Option<Uuid>) {
        match self {
            Self::Patient(id) => (Some(id), None),
            Self::Institution(id) => (None, Some(id)),
        }
    }

    /// The id of the requesting party.
    pub fn id(&self) -> Uuid {
        match self {
            Self::Patient(id) | Self::Institution(id) => *id,
        }
    }

    /// The notification recipient this requester corresponds to.
    pub fn recipient_type(&self) -> RecipientType {
        match self {
            Self::Patient(_) => RecipientType::Patient,
            Self::Institution(_) => RecipientType::HealthcareInstitution,
        }
    }
}
