//! Donor projection consumed by the matcher.

pub mod model;

pub use model::Donor;
