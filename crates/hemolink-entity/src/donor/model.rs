//! Donor entity projection.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::blood_request::BloodType;

/// Minimum interval between donations.
const DONATION_INTERVAL_MONTHS: u32 = 3;

/// The donor attributes relevant to eligibility matching.
///
/// Profile management lives outside this system; only this projection
/// is consumed here.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Donor {
    /// Unique donor identifier.
    pub id: Uuid,
    /// The donor's blood type.
    pub blood_type: BloodType,
    /// Whether the donor is accepting requests.
    pub is_active: bool,
    /// Date of the most recent donation, if any.
    pub last_donation_date: Option<NaiveDate>,
}

impl Donor {
    /// Whether the donor may donate on `today`.
    ///
    /// Eligible if active and either never donated or the last donation
    /// was at least three months ago.
    pub fn is_eligible(&self, today: NaiveDate) -> bool {
        if !self.is_active {
            return false;
        }
        match self.last_donation_date {
            None => true,
            Some(last) => match last.checked_add_months(Months::new(DONATION_INTERVAL_MONTHS)) {
                Some(next_allowed) => next_allowed <= today,
                None => false,
            },
        }
    }

    /// Earliest date from which a donation history still permits donating.
    ///
    /// A donor whose `last_donation_date` is on or before this cutoff is
    /// outside the donation-interval restriction.
    pub fn donation_cutoff(today: NaiveDate) -> NaiveDate {
        today
            .checked_sub_months(Months::new(DONATION_INTERVAL_MONTHS))
            .unwrap_or(NaiveDate::MIN)
    }
}
