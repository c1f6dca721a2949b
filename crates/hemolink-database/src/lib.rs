//! # hemolink-database
//!
//! PostgreSQL connection management and concrete repository
//! implementations for all Hemolink entities. The blood request
//! repository hosts the conditional-update primitive that serializes
//! racing state transitions.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
