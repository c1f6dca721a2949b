//! Pagination query extractor.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::Deserialize;

use hemolink_core::error::AppError;
use hemolink_core::types::pagination::PageRequest;

use crate::error::ApiError;

/// Raw pagination query parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    /// Page number (1-based).
    pub page: Option<u64>,
    /// Number of items per page.
    pub page_size: Option<u64>,
}

/// Extracts and clamps pagination parameters from the query string.
#[derive(Debug, Clone)]
pub struct Pagination(pub PageRequest);

impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<PageQuery>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::validation("Invalid pagination parameters"))?;

        let defaults = PageRequest::default();
        Ok(Pagination(PageRequest::new(
            query.page.unwrap_or(defaults.page),
            query.page_size.unwrap_or(defaults.page_size),
        )))
    }
}
