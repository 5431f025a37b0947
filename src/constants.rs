// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role. Reading these constants should tell you the story of how
//! the system operates: how big a feed page is, how long content stays fresh,
//! how patiently it retries.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Prismic API boundaries
// ---------------------------------------------------------------------------

/// How many post summaries the feed requests per page.
///
/// The original site paginates two posts at a time so the "load more"
/// control is exercised on even tiny repositories. Overridable per query.
pub const FEED_PAGE_SIZE: u32 = 2;

/// Document type queried for the post feed.
pub const FEED_DOCUMENT_TYPE: &str = "posts";

/// Document type used for single-post lookup by UID.
///
/// Note the asymmetry with [`FEED_DOCUMENT_TYPE`]: the feed queries the
/// plural type, detail lookup the singular one. Both exist in the content
/// repository; neither name may be silently swapped for the other.
pub const DETAIL_DOCUMENT_TYPE: &str = "post";

/// Field projection applied to feed queries.
///
/// Restricting the payload to exactly the summary fields keeps feed pages
/// small; detail fetches take the full document instead.
pub const FEED_FETCH_FIELDS: &[&str] = &["posts.title", "posts.subtitle", "posts.author"];

// ---------------------------------------------------------------------------
// Freshness and resilience
// ---------------------------------------------------------------------------

/// How long a fetched post detail is treated as fresh before a refresh
/// is permitted, in seconds. Thirty minutes.
pub const DEFAULT_REVALIDATE_SECS: u64 = 1800;

/// Default timeout applied to every store request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum fetch attempts for a single store operation.
pub const RETRY_MAX_ATTEMPTS: u32 = 3;

/// Delay before the first retry; doubles per attempt up to the cap.
pub const RETRY_INITIAL_DELAY: Duration = Duration::from_millis(250);

/// Upper bound on the backoff delay between retries.
pub const RETRY_MAX_DELAY: Duration = Duration::from_secs(4);

// ---------------------------------------------------------------------------
// Reading time
// ---------------------------------------------------------------------------

/// Assumed reading speed when estimating how long a post takes to read.
pub const WORDS_PER_MINUTE: usize = 200;

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 500;
