//! Notification feed operations.

pub mod service;

pub use service::NotificationService;
