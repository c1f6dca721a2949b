//! Notification recipient addressing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// The kind of party a notification is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "recipient_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RecipientType {
    /// A registered donor.
    Donor,
    /// A patient.
    Patient,
    /// A healthcare institution.
    HealthcareInstitution,
    /// An administrator; delivered through the shared admin group.
    Admin,
}

impl RecipientType {
    /// Return the recipient type as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Donor => "donor",
            Self::Patient => "patient",
            Self::HealthcareInstitution => "healthcare_institution",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for RecipientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecipientType {
    type Err = hemolink_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "donor" => Ok(Self::Donor),
            "patient" => Ok(Self::Patient),
            "healthcare_institution" => Ok(Self::HealthcareInstitution),
            "admin" => Ok(Self::Admin),
            _ => Err(hemolink_core::AppError::validation(format!(
                "Invalid recipient type: '{s}'. Expected one of: donor, patient, healthcare_institution, admin"
            ))),
        }
    }
}

/// A fully addressed notification recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Recipient {
    /// The kind of recipient.
    pub recipient_type: RecipientType,
    /// The recipient's identifier.
    pub recipient_id: Uuid,
}

impl Recipient {
    /// Create a new recipient address.
    pub fn new(recipient_type: RecipientType, recipient_id: Uuid) -> Self {
        Self {
            recipient_type,
            recipient_id,
        }
    }

    /// Address a donor.
    pub fn donor(id: Uuid) -> Self {
        Self::new(RecipientType::Donor, id)
    }

    /// Address an admin (fan-out goes to the shared admin group).
    pub fn admin(id: Uuid) -> Self {
        Self::new(RecipientType::Admin, id)
    }

    /// Address the shared admin group.
    ///
    /// Admin notifications are persisted once under the nil UUID rather
    /// than per administrator; live delivery broadcasts to every
    /// connected admin regardless of this id.
    pub fn admin_group() -> Self {
        Self::new(RecipientType::Admin, Uuid::nil())
    }
}
