//! Errors surfaced by the extract endpoint.

use crate::extraction::ExtractionError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Any failure while serving an extract request.
///
/// None of these are reported to the caller in structured form; they turn
/// into a bare 500 so a broken fixture fails loudly.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("extraction failed: {0}")]
    Extraction(#[from] ExtractionError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "extract request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "500 Internal Server Error").into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_is_500() {
        let err = ApiError::Extraction(ExtractionError::InvalidUrl {
            url: "nope".to_string(),
            source: url::ParseError::RelativeUrlWithoutBase,
        });
        assert!(err.to_string().starts_with("extraction failed"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
