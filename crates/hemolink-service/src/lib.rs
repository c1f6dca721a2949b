//! # hemolink-service
//!
//! Business logic for Hemolink: the request lifecycle state machine,
//! donor eligibility matching, and notification feed operations.
//! Services own authorization decisions; repositories below them only
//! enforce storage-level preconditions.

pub mod context;
pub mod matcher;
pub mod notification;
pub mod request;

pub use context::RequestContext;
pub use matcher::DonorMatcher;
pub use notification::NotificationService;
pub use request::{CreateRequestInput, RequestLifecycleService};
