//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// JWT verification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret used to sign and verify tokens.
    pub jwt_secret: String,
    /// Access token lifetime in seconds.
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_seconds: i64,
    /// Expected token issuer.
    #[serde(default = "default_issuer")]
    pub issuer: String,
}

fn default_access_ttl() -> i64 {
    3600
}

fn default_issuer() -> String {
    "hemolink".to_string()
}
