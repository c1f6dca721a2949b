//! HTTP and WebSocket request handlers.

pub mod blood_request;
pub mod health;
pub mod notification;
pub mod ws;
