//! Blood request status state machine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a blood request.
///
/// Transitions:
/// `Pending → {Matched, Cancelled}`,
/// `Matched → {Accepted, Rejected, Cancelled}`,
/// `Rejected → Pending` (re-opened for further matching),
/// `Accepted → Fulfilled`.
/// `Fulfilled` and `Cancelled` are terminal.
///
/// Every transition is applied through a conditional store update, so
/// `can_transition_to` is the single source of truth for which edges
/// exist; the store enforces *when* they apply under concurrency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "request_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Awaiting a donor match.
    Pending,
    /// A donor has been matched and must confirm.
    Matched,
    /// The matched donor confirmed the donation.
    Accepted,
    /// The matched donor declined; transient, re-opens to Pending.
    Rejected,
    /// Donation completed.
    Fulfilled,
    /// Withdrawn by the requester; terminal.
    Cancelled,
}

impl RequestStatus {
    /// Whether the state machine permits an edge from `self` to `next`.
    pub fn can_transition_to(&self, next: RequestStatus) -> bool {
        use RequestStatus::*;
        matches!(
            (self, next),
            (Pending, Matched)
                | (Pending, Cancelled)
                | (Matched, Accepted)
                | (Matched, Rejected)
                | (Matched, Cancelled)
                | (Rejected, Pending)
                | (Accepted, Fulfilled)
        )
    }

    /// Whether this status is terminal (no outgoing edges).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Fulfilled | Self::Cancelled)
    }

    /// Whether a donor may still claim the request from this status.
    pub fn is_matchable(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Matched => "matched",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Fulfilled => "fulfilled",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = hemolink_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "matched" => Ok(Self::Matched),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            "fulfilled" => Ok(Self::Fulfilled),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(hemolink_core::AppError::validation(format!(
                "Invalid request status: '{s}'"
            ))),
        }
    }
}
