//! Concrete repository implementations.

pub mod blood_request;
pub mod donor;
pub mod notification;

pub use blood_request::{BloodRequestRepository, NewBloodRequest};
pub use donor::DonorRepository;
pub use notification::NotificationRepository;
