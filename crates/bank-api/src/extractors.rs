//! # Request Extractors
//!
//! Helpers that turn axum extraction failures into [`AppError`] so every
//! handler reports malformed input with the same JSON error body.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::Path;
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;
use axum::Json;

use crate::error::AppError;

/// Media type required for partial updates.
pub const MERGE_PATCH_JSON: &str = "application/merge-patch+json";

/// Unwrap a JSON body, mapping a rejection to a 422 `BAD_REQUEST`.
pub fn extract_json<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

/// Unwrap a path parameter, mapping a rejection to a 422 `BAD_REQUEST`.
pub fn extract_path<T>(path: Result<Path<T>, PathRejection>) -> Result<T, AppError> {
    path.map(|Path(value)| value)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

/// Reject the request unless its `Content-Type` is `application/merge-patch+json`.
pub fn require_merge_patch(headers: &HeaderMap) -> Result<(), AppError> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    if essence.eq_ignore_ascii_case(MERGE_PATCH_JSON) {
        Ok(())
    } else {
        Err(AppError::UnsupportedMediaType(format!(
            "expected {MERGE_PATCH_JSON}, got {:?}",
            content_type
        )))
    }
}

/// Parse a merge-patch body. The body is read as raw bytes because axum's
/// `Json` extractor only accepts `application/json`.
pub fn parse_merge_patch<T: serde::de::DeserializeOwned>(
    headers: &HeaderMap,
    body: &[u8],
) -> Result<T, AppError> {
    require_merge_patch(headers)?;
    serde_json::from_slice(body).map_err(|e| AppError::BadRequest(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(content_type: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_str(content_type).unwrap());
        headers
    }

    #[test]
    fn merge_patch_content_type_accepted_with_parameters() {
        assert!(require_merge_patch(&headers("application/merge-patch+json")).is_ok());
        assert!(require_merge_patch(&headers("application/merge-patch+json; charset=utf-8")).is_ok());
    }

    #[test]
    fn plain_json_is_unsupported_for_patch() {
        let err = require_merge_patch(&headers("application/json")).unwrap_err();
        assert!(matches!(err, AppError::UnsupportedMediaType(_)));
        let err = require_merge_patch(&HeaderMap::new()).unwrap_err();
        assert!(matches!(err, AppError::UnsupportedMediaType(_)));
    }

    #[test]
    fn malformed_patch_body_is_bad_request() {
        let result: Result<serde_json::Value, _> =
            parse_merge_patch(&headers(MERGE_PATCH_JSON), b"{not json");
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
