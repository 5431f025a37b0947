// src/lib.rs
//! prismic2page library — fetches blog posts from a Prismic repository
//! and shapes them into render-ready pages.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling** — `AppError`, `StoreErrorKind`, `ValidationError`
//! - **Configuration** — `CommandLineInput`, `PipelineConfig`
//! - **Domain model** — `PostSummary`, `PostDetail`, `Section`, `TextBlock`, `Span`
//! - **Domain types** — `ApiUrl`, `Uid`, `DocumentType`, `PageCursor`, `PublishDate`
//! - **Store client** — `PostStore`, `PrismicHttpClient`, `CachedPostStore`, parsers
//! - **Pagination** — `FeedPaginator`, `LoadOutcome`
//! - **Normalization** — `normalize`, `estimate_reading_time`, `assemble_post_detail`
//! - **Page lifecycle** — `PageLifecycle`, `PageState`, `StateObserver`
//! - **Output** — `OutputPlan`, `DeliveryTarget`, `OutputReport`, `deliver`

pub mod api;
pub mod config;
pub mod constants;
mod content;
mod error;
pub mod error_recovery;
mod feed;
mod model;
mod output;
pub mod page_state;
mod pipeline;
mod types;

// --- Error Handling ---
pub use crate::error::{AppError, StoreErrorKind};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{Command, CommandLineInput, PipelineConfig};

// --- Domain Model ---
pub use crate::model::{
    BlockKind, FeedView, PostDetail, PostSummary, PostView, Section, Span, TextBlock,
};

// --- Domain Types ---
pub use crate::types::{ApiUrl, DocumentType, PageCursor, PublishDate, RenderedPage, Uid};

// --- Store Client ---
pub use crate::api::{
    client::ApiResponse, CachedPostStore, FeedPage, PostStore, PrismicHttpClient, QueryOptions,
};

// --- Pagination ---
pub use crate::feed::{map_summary, FeedPaginator, LoadOutcome};

// --- Normalization ---
pub use crate::content::{assemble_post_detail, estimate_reading_time, normalize};

// --- Page Lifecycle ---
pub use crate::page_state::{PageLifecycle, PageState, StateObserver};

// --- Output ---
pub use crate::output::{deliver, DeliveryTarget, OutputPlan, OutputReport};

// --- Pipeline Traits ---
pub use crate::pipeline::{ContentSource, PageComposer, PageContent, PageDelivery, PageRequest};
