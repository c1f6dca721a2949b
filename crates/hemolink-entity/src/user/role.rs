//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::notification::recipient::RecipientType;

/// Roles carried in verified credentials.
///
/// Account management is external; the engine only needs the role for
/// authorization checks and recipient addressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// System administrator.
    Admin,
    /// A blood donor.
    Donor,
    /// A patient who may submit requests.
    Patient,
    /// A healthcare institution that may submit requests.
    Institution,
}

impl UserRole {
    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Check if this role is a donor.
    pub fn is_donor(&self) -> bool {
        matches!(self, Self::Donor)
    }

    /// Check if this role may submit blood requests.
    pub fn is_requester(&self) -> bool {
        matches!(self, Self::Patient | Self::Institution)
    }

    /// The notification recipient type this role receives on.
    pub fn recipient_type(&self) -> RecipientType {
        match self {
            Self::Admin => RecipientType::Admin,
            Self::Donor => RecipientType::Donor,
            Self::Patient => RecipientType::Patient,
            Self::Institution => RecipientType::HealthcareInstitution,
        }
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Donor => "donor",
            Self::Patient => "patient",
            Self::Institution => "institution",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = hemolink_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "donor" => Ok(Self::Donor),
            "patient" => Ok(Self::Patient),
            "institution" => Ok(Self::Institution),
            _ => Err(hemolink_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: admin, donor, patient, institution"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("donor".parse::<UserRole>().unwrap(), UserRole::Donor);
        assert_eq!("ADMIN".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert!("nurse".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_recipient_mapping() {
        assert_eq!(
            UserRole::Institution.recipient_type(),
            RecipientType::HealthcareInstitution
        );
        assert_eq!(UserRole::Donor.recipient_type(), RecipientType::Donor);
    }

    #[test]
    fn test_requester_roles() {
        assert!(UserRole::Patient.is_requester());
        assert!(UserRole::Institution.is_requester());
        assert!(!UserRole::Donor.is_requester());
        assert!(!UserRole::Admin.is_requester());
    }
}
