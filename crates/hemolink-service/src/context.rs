//! Per-call identity context.

use uuid::Uuid;

use hemolink_core::{AppError, AppResult};
use hemolink_entity::blood_request::RequesterRef;
use hemolink_entity::notification::Recipient;
use hemolink_entity::user::UserRole;

/// The verified identity a service call runs under.
///
/// Built from validated token claims at the API boundary and threaded
/// through every service operation.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Authenticated user ID.
    pub user_id: Uuid,
    /// Role carried by the credential.
    pub role: UserRole,
    /// Display name, used in notification text.
    pub name: String,
}

impl RequestContext {
    /// Create a new context.
    pub fn new(user_id: Uuid, role: UserRole, name: impl Into<String>) -> Self {
        Self {
            user_id,
            role,
            name: name.into(),
        }
    }

    /// Whether the caller is an administrator.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Whether the caller is a donor.
    pub fn is_donor(&self) -> bool {
        self.role.is_donor()
    }

    /// The notification recipient identity of the caller.
    pub fn recipient(&self) -> Recipient {
        Recipient::new(self.role.recipient_type(), self.user_id)
    }

    /// The recipient identity the caller's persisted feed lives under.
    ///
    /// Admin notifications are stored once for the shared group, so an
    /// admin's feed is the group feed.
    pub fn feed_recipient(&self) -> Recipient {
        if self.is_admin() {
            Recipient::admin_group()
        } else {
            self.recipient()
        }
    }

    /// The caller as a requester, if their role may submit requests.
    pub fn requester(&self) -> AppResult<RequesterRef> {
        match self.role {
            UserRole::Patient => Ok(RequesterRef::Patient(self.user_id)),
            UserRole::Institution => Ok(RequesterRef::Institution(self.user_id)),
            _ => Err(AppError::authorization(
                "Only patients and institutions may submit blood requests",
            )),
        }
    }
}
