//! Inbound request bodies.

use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use hemolink_entity::blood_request::{BloodType, UrgencyLevel};
use hemolink_service::request::CreateRequestInput;

/// Body of `POST /api/blood-requests`.
///
/// Shallow shape checks live here; date and role rules are enforced by
/// the lifecycle service.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBloodRequestBody {
    /// Required blood type.
    pub blood_type: BloodType,
    /// Units needed.
    #[validate(range(min = 1, message = "units must be at least 1"))]
    pub units: i32,
    /// Urgency level.
    pub urgency: UrgencyLevel,
    /// Date by which the blood is required.
    pub required_by: NaiveDate,
    /// Free-text notes.
    #[validate(length(max = 2000, message = "notes too long"))]
    pub notes: Option<String>,
    /// Latitude of the requester.
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    /// Longitude of the requester.
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}

impl From<CreateBloodRequestBody> for CreateRequestInput {
    fn from(body: CreateBloodRequestBody) -> Self {
        Self {
            blood_type: body.blood_type,
            units: body.units,
            urgency: body.urgency,
            required_by: body.required_by,
            notes: body.notes,
            latitude: body.latitude.unwrap_or(0.0),
            longitude: body.longitude.unwrap_or(0.0),
        }
    }
}
