//! User role definitions consumed at the authentication boundary.

pub mod role;

pub use role::UserRole;
