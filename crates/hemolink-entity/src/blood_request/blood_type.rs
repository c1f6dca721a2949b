//! Blood type enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The eight ABO/Rh blood types.
///
/// Matching is exact: a request for `O-` notifies only `O-` donors.
/// Compatibility widening is a matching-policy concern left to medical
/// staff, not encoded here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "blood_type")]
pub enum BloodType {
    /// O negative.
    #[serde(rename = "O-")]
    #[sqlx(rename = "O-")]
    ONeg,
    /// O positive.
    #[serde(rename = "O+")]
    #[sqlx(rename = "O+")]
    OPos,
    /// A negative.
    #[serde(rename = "A-")]
    #[sqlx(rename = "A-")]
    ANeg,
    /// A positive.
    #[serde(rename = "A+")]
    #[sqlx(rename = "A+")]
    APos,
    /// B negative.
    #[serde(rename = "B-")]
    #[sqlx(rename = "B-")]
    BNeg,
    /// B positive.
    #[serde(rename = "B+")]
    #[sqlx(rename = "B+")]
    BPos,
    /// AB negative.
    #[serde(rename = "AB-")]
    #[sqlx(rename = "AB-")]
    AbNeg,
    /// AB positive.
    #[serde(rename = "AB+")]
    #[sqlx(rename = "AB+")]
    AbPos,
}

impl BloodType {
    /// All valid blood types.
    pub const ALL: [BloodType; 8] = [
        Self::ONeg,
        Self::OPos,
        Self::ANeg,
        Self::APos,
        Self::BNeg,
        Self::BPos,
        Self::AbNeg,
        Self::AbPos,
    ];

    /// Return the blood type as its clinical notation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ONeg => "O-",
            Self::OPos => "O+",
            Self::ANeg => "A-",
            Self::APos => "A+",
            Self::BNeg => "B-",
            Self::BPos => "B+",
            Self::AbNeg => "AB-",
            Self::AbPos => "AB+",
        }
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BloodType {
    type Err = hemolink_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "O-" => Ok(Self::ONeg),
            "O+" => Ok(Self::OPos),
            "A-" => Ok(Self::ANeg),
            "A+" => Ok(Self::APos),
            "B-" => Ok(Self::BNeg),
            "B+" => Ok(Self::BPos),
            "AB-" => Ok(Self::AbNeg),
            "AB+" => Ok(Self::AbPos),
            _ => Err(hemolink_core::AppError::validation(format!(
                "Invalid blood type: '{s}'. Expected one of: O-, O+, A-, A+, B-, B+, AB-, AB+"
            ))),
        }
    }
}
