//! Page query extractor
//!
//! Extracts the 1-based `page` parameter used by the invite management view.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;

use crate::response::ApiError;

/// Raw query parameters
#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub page: Option<i64>,
}

/// Requested page. Out-of-range values are clamped by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery {
    pub page: i64,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self { page: 1 }
    }
}

impl From<PageParams> for PageQuery {
    fn from(params: PageParams) -> Self {
        Self {
            page: params.page.unwrap_or(1),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for PageQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PageParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.to_string()))?;

        Ok(PageQuery::from(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_page() {
        assert_eq!(PageQuery::default().page, 1);
        assert_eq!(PageQuery::from(PageParams { page: None }).page, 1);
    }

    #[test]
    fn test_page_passthrough() {
        assert_eq!(PageQuery::from(PageParams { page: Some(3) }).page, 3);
        // clamping happens in the service
        assert_eq!(PageQuery::from(PageParams { page: Some(-2) }).page, -2);
    }
}
