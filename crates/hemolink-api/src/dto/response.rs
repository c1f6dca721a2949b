//! Outbound response envelope.

use serde::Serialize;

/// Uniform success envelope for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Always `true`; errors use [`crate::error::ApiErrorResponse`].
    pub success: bool,
    /// Response payload.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wrap a payload in the success envelope.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
