// src/pipeline.rs
//! Pipeline capability traits — abstract the three stages of the
//! store-to-page pipeline.
//!
//! Each trait describes a single capability, enabling testing each stage
//! in isolation.

use crate::error::AppError;
use crate::model::{FeedView, PostView};
use crate::output::OutputReport;
use crate::types::{RenderedPage, Uid};

/// What the caller navigated to.
#[derive(Debug, Clone)]
pub enum PageRequest {
    /// The post list, following this many continuation pages after the
    /// first (`None` = follow until the feed is exhausted).
    Feed { follow_pages: Option<u32> },
    /// One post's detail page.
    Post { uid: Uid },
}

/// The fetched, shaped content for a page — the renderer's input.
#[derive(Debug, Clone)]
pub enum PageContent {
    Feed(FeedView),
    Post(PostView),
}

/// Retrieves and shapes content for a page request.
#[async_trait::async_trait]
pub trait ContentSource {
    async fn fetch(&self, request: &PageRequest) -> Result<PageContent, AppError>;
}

/// Transforms page content into a RenderedPage.
pub trait PageComposer {
    fn compose(&self, content: &PageContent) -> Result<RenderedPage, AppError>;
}

/// Delivers a rendered page to its destinations.
pub trait PageDelivery {
    fn deliver(&self, page: RenderedPage) -> Result<OutputReport, AppError>;
}
