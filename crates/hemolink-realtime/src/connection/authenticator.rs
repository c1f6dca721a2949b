//! Connect-time authentication for WebSocket channels.
//!
//! Registration requires a verified identity. A connection that cannot
//! present a valid access token is rejected before any channel is
//! created.

use std::sync::Arc;
use uuid::Uuid;

use hemolink_auth::jwt::JwtDecoder;
use hemolink_core::{AppError, AppResult};
use hemolink_entity::notification::Recipient;
use hemolink_entity::user::UserRole;

/// A verified identity extracted from an access token.
#[derive(Debug, Clone)]
pub struct AuthenticatedConnection {
    /// Authenticated user ID.
    pub user_id: Uuid,
    /// Role carried by the token.
    pub role: UserRole,
    /// Display name carried by the token.
    pub name: String,
}

impl AuthenticatedConnection {
    /// The recipient identity notifications for this user are addressed to.
    pub fn recipient(&self) -> Recipient {
        Recipient::new(self.role.recipient_type(), self.user_id)
    }
}

/// Validates access tokens presented at WebSocket connect time.
#[derive(Debug, Clone)]
pub struct WsAuthenticator {
    decoder: Arc<JwtDecoder>,
}

impl WsAuthenticator {
    /// Creates a new authenticator around a token decoder.
    pub fn new(decoder: Arc<JwtDecoder>) -> Self {
        Self { decoder }
    }

    /// Verifies the presented token and returns the identity to register.
    pub fn authenticate(&self, token: Option<&str>) -> AppResult<AuthenticatedConnection> {
        let token = token.ok_or_else(|| AppError::authentication("Missing access token"))?;
        let claims = self.decoder.decode_access_token(token)?;

        Ok(AuthenticatedConnection {
            user_id: claims.user_id(),
            role: claims.role,
            name: claims.name,
        })
    }
}
