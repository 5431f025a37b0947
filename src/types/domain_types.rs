// src/types/domain_types.rs
//! Domain-specific newtypes for type safety and validation.

use super::ValidationError;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

lazy_static! {
    /// Prismic repository names: lowercase alphanumerics and hyphens.
    static ref REPO_NAME_REGEX: Regex =
        Regex::new(r"^[a-z0-9][a-z0-9-]*$").expect("repo name regex must compile");

    /// Document UIDs: the slug alphabet Prismic generates from titles.
    static ref UID_REGEX: Regex =
        Regex::new(r"^[a-z0-9]+(?:[._-][a-z0-9]+)*$").expect("uid regex must compile");

    /// Custom-type API identifiers.
    static ref DOCUMENT_TYPE_REGEX: Regex =
        Regex::new(r"^[a-z][a-z0-9_-]*$").expect("document type regex must compile");
}

/// The validated base endpoint of a Prismic repository API.
///
/// Accepts either a full API URL (`https://myrepo.cdn.prismic.io/api/v2`)
/// or a bare repository name (`myrepo`), which is expanded to the standard
/// CDN endpoint. The stored form always ends in `/api/v2` with no trailing
/// slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiUrl(Url);

impl ApiUrl {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let input = input.trim().trim_end_matches('/');

        if input.is_empty() {
            return Err(ValidationError::InvalidEndpoint {
                input: input.to_string(),
                reason: "endpoint cannot be empty".to_string(),
            });
        }

        // Bare repository name
        if !input.contains("://") {
            if !REPO_NAME_REGEX.is_match(input) {
                return Err(ValidationError::InvalidEndpoint {
                    input: input.to_string(),
                    reason: "repository names contain only lowercase letters, digits and hyphens"
                        .to_string(),
                });
            }
            let url = format!("https://{}.cdn.prismic.io/api/v2", input);
            return Url::parse(&url)
                .map(Self)
                .map_err(|e| ValidationError::InvalidEndpoint {
                    input: input.to_string(),
                    reason: e.to_string(),
                });
        }

        let mut parsed = Url::parse(input).map_err(|e| ValidationError::InvalidEndpoint {
            input: input.to_string(),
            reason: e.to_string(),
        })?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ValidationError::InvalidEndpoint {
                input: input.to_string(),
                reason: "only HTTP and HTTPS endpoints are supported".to_string(),
            });
        }

        if !parsed.path().ends_with("/api/v2") {
            let path = format!("{}/api/v2", parsed.path().trim_end_matches('/'));
            parsed.set_path(&path);
        }

        Ok(Self(parsed))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// The document-search endpoint derived from this base.
    pub fn search_endpoint(&self) -> Url {
        let mut url = self.0.clone();
        let path = format!("{}/documents/search", url.path().trim_end_matches('/'));
        url.set_path(&path);
        url
    }
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A document's unique slug within its custom type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Uid(String);

impl Uid {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::InvalidUid {
                uid: input.to_string(),
                reason: "UID cannot be empty".to_string(),
            });
        }
        if !UID_REGEX.is_match(trimmed) {
            return Err(ValidationError::InvalidUid {
                uid: input.to_string(),
                reason: "UIDs are lowercase slugs (letters, digits, separators)".to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for Uid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Uid::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// The API identifier of a custom type in the repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentType(String);

impl DocumentType {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if !DOCUMENT_TYPE_REGEX.is_match(trimmed) {
            return Err(ValidationError::InvalidDocumentType {
                name: input.to_string(),
                reason: "type identifiers start with a letter and use lowercase letters, digits, '_' or '-'"
                    .to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A composed, render-ready page payload — the output contract handed to
/// the external renderer. Wrapping the string stops half-composed content
/// from reaching delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage(String);

impl RenderedPage {
    pub fn new(content: String) -> Self {
        Self(content)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}
