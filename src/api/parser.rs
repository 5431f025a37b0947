// src/api/parser.rs
//! Turns raw response text into typed wire schemas.
//!
//! Success bodies go through strict serde parsing; failure bodies are
//! classified into the [`StoreErrorKind`] vocabulary so callers can decide
//! on retry vs. not-found without inspecting strings.

use super::client::ApiResponse;
use super::responses::{ApiInfo, QueryResponse, StoreErrorBody};
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{AppError, StoreErrorKind};
use reqwest::StatusCode;

/// Parse any store response into the expected type, or a classified error.
pub fn parse_store_response<T>(result: ApiResponse<String>) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    if result.status.is_success() {
        parse_success(&result.data, &result.url)
    } else {
        Err(classify_failure(&result.data, result.status, &result.url))
    }
}

fn parse_success<T>(body: &str, url: &str) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);
        AppError::MalformedResponse(format!(
            "{} (from {}): {}",
            e,
            url,
            preview_body(body)
        ))
    })
}

/// Classify a non-2xx response into the typed failure vocabulary.
pub fn classify_failure(body: &str, status: StatusCode, url: &str) -> AppError {
    let parsed: Option<StoreErrorBody> = serde_json::from_str(body).ok();

    let (kind, message) = match &parsed {
        Some(err_body) => (
            StoreErrorKind::classify(status.as_u16(), err_body.error_type.as_deref()),
            err_body.message().to_string(),
        ),
        None => (
            StoreErrorKind::classify(status.as_u16(), None),
            format!("HTTP {} from {}", status, url),
        ),
    };

    AppError::StoreService {
        kind,
        message,
        status,
    }
}

/// Parse a document-search page.
pub fn parse_query_response(result: ApiResponse<String>) -> Result<QueryResponse, AppError> {
    parse_store_response(result)
}

/// Parse the repository entry point.
pub fn parse_api_info(result: ApiResponse<String>) -> Result<ApiInfo, AppError> {
    parse_store_response(result)
}

fn preview_body(body: &str) -> &str {
    let mut end = ERROR_BODY_PREVIEW_LENGTH.min(body.len());
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn response(status: StatusCode, body: &str) -> ApiResponse<String> {
        ApiResponse {
            data: body.to_string(),
            status,
            url: "http://test/documents/search".to_string(),
        }
    }

    #[test]
    fn success_body_parses() {
        let body = r#"{
            "page": 1, "results_per_page": 2, "results_size": 0,
            "total_results_size": 0, "total_pages": 0,
            "next_page": null, "prev_page": null, "results": []
        }"#;
        let parsed = parse_query_response(response(StatusCode::OK, body)).unwrap();
        assert_eq!(parsed.results.len(), 0);
        assert!(parsed.next_page.is_none());
    }

    #[test]
    fn truncated_body_is_malformed() {
        let result =
            parse_query_response(response(StatusCode::OK, r#"{"page": 1, "results":"#));
        match result {
            Err(AppError::MalformedResponse(msg)) => {
                assert!(msg.contains("http://test/documents/search"))
            }
            other => panic!("expected MalformedResponse, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn typed_error_body_is_classified() {
        let err = classify_failure(
            r#"{"type": "api_notfound_error", "message": "unknown repository"}"#,
            StatusCode::NOT_FOUND,
            "http://test",
        );
        match err {
            AppError::StoreService { kind, message, .. } => {
                assert_eq!(kind, StoreErrorKind::RepositoryNotFound);
                assert_eq!(message, "unknown repository");
            }
            other => panic!("expected StoreService, got {}", other),
        }
    }

    #[test]
    fn unparseable_error_body_falls_back_to_status() {
        let err = classify_failure("<html>nope</html>", StatusCode::SERVICE_UNAVAILABLE, "http://t");
        match err {
            AppError::StoreService { kind, .. } => {
                assert_eq!(kind, StoreErrorKind::ServiceUnavailable);
                assert!(kind.is_retryable());
            }
            other => panic!("expected StoreService, got {}", other),
        }
    }
}
