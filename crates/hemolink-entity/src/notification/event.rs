//! Notification event type tags.
//!
//! String tags rather than an enum: clients treat them as opaque labels
//! and new tags must not require a schema migration.

/// A new blood request matching the donor's type.
pub const BLOOD_REQUEST: &str = "blood_request";
/// A donor claimed a request (sent to requester and admins).
pub const DONOR_ACCEPT: &str = "donor_accept";
/// The matched donor confirmed the donation.
pub const REQUEST_ACCEPTED: &str = "request_accepted";
/// The matched donor declined; the request re-opened.
pub const REQUEST_REJECTED: &str = "request_rejected";
/// The requester withdrew the request.
pub const REQUEST_CANCELLED: &str = "request_cancelled";
/// The donation completed.
pub const REQUEST_FULFILLED: &str = "request_fulfilled";
