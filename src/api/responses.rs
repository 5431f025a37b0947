// src/api/responses.rs
//! Wire schemas for the content store's responses.
//!
//! These types mirror the JSON the store actually sends, nothing more.
//! Validation into the domain model happens in one place (`model` assembly
//! via `content`/`feed`), so a malformed document is reported with the
//! field and UID that broke, not a bare deserializer backtrace.

use crate::types::PublishDate;
use serde::{Deserialize, Serialize};

/// The repository's API entry point — only the refs matter to us.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiInfo {
    pub refs: Vec<ApiRef>,
}

/// A content ref: a frozen, queryable view of the repository.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiRef {
    pub id: String,
    #[serde(rename = "ref")]
    pub reference: String,
    pub label: String,
    #[serde(rename = "isMasterRef", default)]
    pub is_master_ref: bool,
}

impl ApiInfo {
    /// The master ref — the currently published view of the content.
    pub fn master_ref(&self) -> Option<&ApiRef> {
        self.refs.iter().find(|r| r.is_master_ref)
    }
}

/// One page of a document-search query.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse {
    pub page: u32,
    pub results_per_page: u32,
    pub results_size: u32,
    pub total_results_size: u32,
    pub total_pages: u32,
    pub next_page: Option<String>,
    pub prev_page: Option<String>,
    pub results: Vec<RawDocument>,
}

/// A document as the store returns it, before validation.
///
/// Fields the domain model requires are still `Option` here: requiredness
/// is enforced during mapping so the error can name the offending field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDocument {
    pub id: String,
    pub uid: Option<String>,
    #[serde(rename = "type")]
    pub doc_type: String,
    pub first_publication_date: Option<PublishDate>,
    #[serde(default)]
    pub data: RawPostData,
}

/// The `data` payload of a post document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPostData {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub author: Option<String>,
    pub banner: Option<RawBanner>,
    pub content: Option<Vec<RawSection>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawBanner {
    pub url: Option<String>,
}

/// A rich-text group: heading plus body blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSection {
    #[serde(default)]
    pub heading: String,
    #[serde(default)]
    pub body: Vec<RawTextBlock>,
}

/// One rich-text block on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTextBlock {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub spans: Vec<RawSpan>,
}

/// One inline span on the wire. `data` is only present for link-like spans.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSpan {
    pub start: usize,
    pub end: usize,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: Option<serde_json::Map<String, serde_json::Value>>,
}

/// The store's error body, in either of the shapes it uses.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreErrorBody {
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    pub message: Option<String>,
    pub error: Option<String>,
}

impl StoreErrorBody {
    /// The human-readable message, whichever field carried it.
    pub fn message(&self) -> &str {
        self.message
            .as_deref()
            .or(self.error.as_deref())
            .unwrap_or("no error message")
    }
}
