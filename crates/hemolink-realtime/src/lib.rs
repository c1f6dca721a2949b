//! # hemolink-realtime
//!
//! Real-time delivery layer: the session registry mapping authenticated
//! identities to live WebSocket channels, the fan-out dispatcher that
//! persists notifications before best-effort push, and the wire message
//! types shared with clients.

pub mod connection;
pub mod dispatcher;
pub mod message;

pub use connection::registry::SessionRegistry;
pub use dispatcher::FanoutDispatcher;
