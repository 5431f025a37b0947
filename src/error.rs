// src/error.rs
//! Application error types with structured error handling.
//!
//! Error types form the vocabulary for failure modes in the system.
//! Each error variant tells the story of what went wrong and where,
//! enabling composable recovery strategies.

use std::fmt;
use thiserror::Error;

/// Content-store failure reasons as a typed vocabulary.
///
/// Instead of matching against HTTP status codes or message substrings
/// at every call site, the failure taxonomy is encoded in the type system.
/// Each variant tells you exactly what the store reported and enables
/// pattern-based recovery without stringly-typed dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreErrorKind {
    /// The requested document does not exist.
    DocumentNotFound,
    /// The continuation ref used for the query has expired or is unknown.
    ExpiredRef,
    /// Request rate limit exceeded — back off and retry.
    RateLimited,
    /// The repository rejected the query parameters.
    InvalidQuery,
    /// The repository itself was not found (wrong endpoint).
    RepositoryNotFound,
    /// The store is temporarily unavailable.
    ServiceUnavailable,
    /// HTTP status fallback when the error body is unparseable.
    HttpStatus(u16),
    /// An error the client doesn't recognize yet.
    Unknown(String),
}

impl StoreErrorKind {
    /// Classify an HTTP status plus an optional error-body type string.
    pub fn classify(status: u16, body_type: Option<&str>) -> Self {
        match body_type {
            Some("api_notfound_error") => return Self::RepositoryNotFound,
            Some("api_validation_error") => return Self::InvalidQuery,
            Some("api_security_error") => return Self::InvalidQuery,
            Some(other) if !other.is_empty() => return Self::Unknown(other.to_string()),
            _ => {}
        }
        match status {
            404 => Self::DocumentNotFound,
            410 => Self::ExpiredRef,
            429 => Self::RateLimited,
            500 | 502 => Self::ServiceUnavailable,
            503 => Self::ServiceUnavailable,
            other => Self::HttpStatus(other),
        }
    }

    /// Whether this failure is transient and worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited | Self::ServiceUnavailable | Self::ExpiredRef
        ) || matches!(self, Self::HttpStatus(code) if *code >= 500)
    }

    /// Whether this failure means the resource simply doesn't exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::DocumentNotFound | Self::RepositoryNotFound)
    }
}

impl fmt::Display for StoreErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DocumentNotFound => write!(f, "document_not_found"),
            Self::ExpiredRef => write!(f, "expired_ref"),
            Self::RateLimited => write!(f, "rate_limited"),
            Self::InvalidQuery => write!(f, "invalid_query"),
            Self::RepositoryNotFound => write!(f, "repository_not_found"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
            Self::HttpStatus(code) => write!(f, "http_{}", code),
            Self::Unknown(kind) => write!(f, "{}", kind),
        }
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Content store returned an error ({kind}): {message}")]
    StoreService {
        kind: StoreErrorKind,
        message: String,
        status: reqwest::StatusCode,
    },

    #[error("No '{doc_type}' document with UID '{uid}'")]
    NotFound { doc_type: String, uid: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Output delivery failed: {}", failures.join(", "))]
    DeliveryFailed { failures: Vec<String> },

    #[error("Internal error: {message}")]
    InternalError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error(transparent)]
    ValidationError(#[from] crate::types::ValidationError),

    #[error(transparent)]
    StateError(#[from] crate::page_state::StateError),
}

impl AppError {
    /// Whether retrying the failed operation could plausibly succeed.
    ///
    /// Network failures and retryable store errors qualify; a missing
    /// document or a malformed body never does.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::NetworkFailure(_) => true,
            Self::StoreService { kind, .. } => kind.is_retryable(),
            _ => false,
        }
    }

    /// Whether this error means the requested document doesn't exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::StoreService { kind, .. } => kind.is_not_found(),
            _ => false,
        }
    }
}

// Allow converting from anyhow::Error, preserving the message
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalError {
            message: err.to_string(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}

/// Result type alias for convenience
#[allow(dead_code)]
pub type Result<T, E = AppError> = std::result::Result<T, E>;
