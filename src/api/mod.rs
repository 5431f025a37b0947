// src/api/mod.rs
//! Content-store interaction — the ability to read documents from a
//! Prismic repository.
//!
//! This module keeps a clear separation between I/O (client), parsing
//! (parser/responses), and freshness (cache). Business logic depends on
//! the [`PostStore`] trait, never on HTTP details.

pub mod cache;
pub mod client;
pub mod parser;
pub mod responses;

use crate::error::AppError;
use crate::types::{DocumentType, PageCursor, Uid, ValidationError};
use responses::{QueryResponse, RawDocument};
use url::Url;

/// The ability to read post documents from a content repository.
///
/// This is the fundamental algebra for store interaction. The paginator
/// and the page pipeline depend on this trait; tests substitute in-memory
/// implementations.
#[async_trait::async_trait]
pub trait PostStore: Send + Sync {
    /// Queries one page of documents of a type, with optional projection.
    async fn query_by_type(
        &self,
        doc_type: &DocumentType,
        options: &QueryOptions,
    ) -> Result<FeedPage, AppError>;

    /// Follows a continuation URL from an earlier page, verbatim.
    async fn fetch_page(&self, cursor: &Url) -> Result<FeedPage, AppError>;

    /// Fetches the single document of a type with the given UID.
    ///
    /// Signals [`AppError::NotFound`] when no document matches.
    async fn get_by_uid(&self, doc_type: &DocumentType, uid: &Uid)
        -> Result<RawDocument, AppError>;
}

/// Options for a type query: field projection and page size.
#[derive(Debug, Clone)]
pub struct QueryOptions {
    fields: Vec<String>,
    page_size: u32,
}

impl QueryOptions {
    /// Builds query options. `page_size` must be positive.
    pub fn new(fields: Vec<String>, page_size: u32) -> Result<Self, ValidationError> {
        if page_size == 0 {
            return Err(ValidationError::InvalidPageSize(page_size));
        }
        Ok(Self { fields, page_size })
    }

    /// The projection and page size the post feed uses.
    pub fn feed_defaults() -> Self {
        Self {
            fields: crate::constants::FEED_FETCH_FIELDS
                .iter()
                .map(|f| f.to_string())
                .collect(),
            page_size: crate::constants::FEED_PAGE_SIZE,
        }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }
}

/// One fetched page of the feed: raw documents plus the continuation cursor.
#[derive(Debug, Clone)]
pub struct FeedPage {
    pub results: Vec<RawDocument>,
    pub next_page: PageCursor,
    pub total_results_size: u32,
}

impl FeedPage {
    /// Validates a wire response into a feed page.
    ///
    /// A `next_page` value that is neither null nor a URL is a malformed
    /// response, caught here rather than at the next `load_more`.
    pub fn from_response(response: QueryResponse) -> Result<Self, AppError> {
        let next_page = PageCursor::from_next_page(response.next_page.as_deref())
            .map_err(|e| AppError::MalformedResponse(e.to_string()))?;
        Ok(Self {
            results: response.results,
            next_page,
            total_results_size: response.total_results_size,
        })
    }
}

// Re-export the public interface
pub use cache::CachedPostStore;
pub use client::PrismicHttpClient;
