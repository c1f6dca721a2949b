//! # hemolink-api
//!
//! Axum HTTP and WebSocket boundary. Handlers translate between the
//! wire and [`hemolink_service`]; no business rules live here.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
