//! # hemolink-entity
//!
//! Domain entity models for Hemolink: blood requests and their state
//! machine, donor projections, notifications, and user roles. All row
//! types derive `sqlx::FromRow` and map 1:1 onto the migration schema.

pub mod blood_request;
pub mod donor;
pub mod notification;
pub mod user;
