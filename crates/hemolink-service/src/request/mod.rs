//! Blood request lifecycle operations.

pub mod service;

pub use service::{CreateRequestInput, RequestLifecycleService};
