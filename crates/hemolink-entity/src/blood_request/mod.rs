//! Blood request entity: model, status state machine, and value enums.

pub mod blood_type;
pub mod model;
pub mod requester;
pub mod status;
pub mod urgency;

pub use blood_type::BloodType;
pub use model::BloodRequest;
pub use requester::RequesterRef;
pub use status::RequestStatus;
pub use urgency::UrgencyLevel;
