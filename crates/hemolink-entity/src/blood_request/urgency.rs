//! Request urgency level.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Urgency of a blood request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "urgency_level", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    /// Routine restocking.
    Low,
    /// Needed within days.
    Medium,
    /// Needed immediately.
    High,
}

impl UrgencyLevel {
    /// Return the urgency as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UrgencyLevel {
    type Err = hemolink_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(hemolink_core::AppError::validation(format!(
                "Invalid urgency level: '{s}'. Expected one of: low, medium, high"
            ))),
        }
    }
}
