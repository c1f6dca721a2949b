//! Notification entity: model, recipient addressing, and event types.

pub mod event;
pub mod model;
pub mod recipient;

pub use model::Notification;
pub use recipient::{Recipient, RecipientType};
