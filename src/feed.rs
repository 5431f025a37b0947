// src/feed.rs
//! Incremental pagination of the post feed.
//!
//! A [`FeedPaginator`] owns the list of summaries loaded so far and the
//! continuation cursor. `load_more` is the only mutating operation and it
//! mutates atomically: the whole next page is fetched and mapped before
//! `visible` or `cursor` is touched, so a failure of any kind leaves the
//! paginator exactly as it was, ready for a retry.

use crate::api::responses::RawDocument;
use crate::api::{FeedPage, PostStore, QueryOptions};
use crate::error::AppError;
use crate::model::PostSummary;
use crate::types::{DocumentType, PageCursor, Uid};
use std::sync::Arc;

/// What a `load_more` call accomplished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// This many summaries were appended to the visible list.
    Appended(usize),
    /// The cursor was already terminal; nothing changed.
    EndOfFeed,
}

/// Client-visible pagination state for one feed view.
///
/// Exclusive access is structural: `load_more` takes `&mut self`, so at
/// most one load can be in flight for a paginator at a time.
pub struct FeedPaginator {
    store: Arc<dyn PostStore>,
    visible: Vec<PostSummary>,
    cursor: PageCursor,
}

impl FeedPaginator {
    /// Builds a paginator from an already-fetched initial page.
    pub fn from_initial_page(store: Arc<dyn PostStore>, page: FeedPage) -> Result<Self, AppError> {
        let visible = map_page(&page)?;
        Ok(Self {
            store,
            visible,
            cursor: page.next_page,
        })
    }

    /// Queries the store for the first page and builds a paginator on it.
    pub async fn bootstrap(
        store: Arc<dyn PostStore>,
        doc_type: &DocumentType,
        options: &QueryOptions,
    ) -> Result<Self, AppError> {
        let page = store.query_by_type(doc_type, options).await?;
        Self::from_initial_page(store, page)
    }

    /// Fetches the next page and appends its summaries.
    ///
    /// A terminal cursor makes this a no-op: it returns
    /// [`LoadOutcome::EndOfFeed`] without touching the store and never
    /// errors, so callers may call it blindly. On failure nothing is
    /// appended and the cursor still addresses the failed page.
    pub async fn load_more(&mut self) -> Result<LoadOutcome, AppError> {
        let Some(next_url) = self.cursor.next_url().cloned() else {
            log::debug!("load_more on exhausted feed is a no-op");
            return Ok(LoadOutcome::EndOfFeed);
        };

        let page = self.store.fetch_page(&next_url).await?;
        let mapped = map_page(&page)?;

        let appended = mapped.len();
        self.visible.extend(mapped);
        self.cursor = page.next_page;

        log::debug!(
            "Appended {} summaries ({} visible), cursor: {}",
            appended,
            self.visible.len(),
            self.cursor
        );
        Ok(LoadOutcome::Appended(appended))
    }

    /// The summaries loaded so far, in publication order as returned by
    /// the store — never reordered or deduplicated.
    pub fn visible(&self) -> &[PostSummary] {
        &self.visible
    }

    pub fn cursor(&self) -> &PageCursor {
        &self.cursor
    }

    pub fn has_more(&self) -> bool {
        self.cursor.has_more()
    }
}

/// Maps a whole page of raw documents, failing before any partial result
/// can leak into paginator state.
fn map_page(page: &FeedPage) -> Result<Vec<PostSummary>, AppError> {
    page.results.iter().map(map_summary).collect()
}

/// Maps one raw document into a feed summary.
///
/// Extracts exactly the summary fields — uid, publication date, title,
/// subtitle, author — and drops everything else the store sent. Missing
/// required fields are malformed, reported by name.
pub fn map_summary(document: &RawDocument) -> Result<PostSummary, AppError> {
    let missing = |field: &str| {
        AppError::MalformedResponse(format!(
            "document '{}' is missing required field '{}'",
            document.id, field
        ))
    };

    let uid_str = document.uid.as_deref().ok_or_else(|| missing("uid"))?;
    Ok(PostSummary {
        uid: Uid::parse(uid_str)?,
        first_publication_date: document.first_publication_date,
        title: document.data.title.clone().ok_or_else(|| missing("data.title"))?,
        subtitle: document
            .data
            .subtitle
            .clone()
            .ok_or_else(|| missing("data.subtitle"))?,
        author: document.data.author.clone().ok_or_else(|| missing("data.author"))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::responses::QueryResponse;
    use pretty_assertions::assert_eq;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Mutex;
    use url::Url;

    /// A store that replays a script of page responses.
    struct ScriptedStore {
        responses: Mutex<VecDeque<ScriptedResponse>>,
        fetches: AtomicUsize,
    }

    enum ScriptedResponse {
        Page(FeedPage),
        Fail,
    }

    impl ScriptedStore {
        fn new(responses: Vec<ScriptedResponse>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                fetches: AtomicUsize::new(0),
            })
        }

        fn fetch_count(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }

        async fn next_response(&self) -> Result<FeedPage, AppError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            match self.responses.lock().await.pop_front() {
                Some(ScriptedResponse::Page(page)) => Ok(page),
                Some(ScriptedResponse::Fail) => Err(AppError::StoreService {
                    kind: crate::error::StoreErrorKind::ServiceUnavailable,
                    message: "scripted failure".to_string(),
                    status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
                }),
                None => panic!("store queried past the end of its script"),
            }
        }
    }

    #[async_trait::async_trait]
    impl PostStore for ScriptedStore {
        async fn query_by_type(
            &self,
            _doc_type: &DocumentType,
            _options: &QueryOptions,
        ) -> Result<FeedPage, AppError> {
            self.next_response().await
        }

        async fn fetch_page(&self, _cursor: &Url) -> Result<FeedPage, AppError> {
            self.next_response().await
        }

        async fn get_by_uid(
            &self,
            doc_type: &DocumentType,
            uid: &Uid,
        ) -> Result<RawDocument, AppError> {
            Err(AppError::NotFound {
                doc_type: doc_type.to_string(),
                uid: uid.to_string(),
            })
        }
    }

    fn page_from_json(json: &str) -> FeedPage {
        let response: QueryResponse = serde_json::from_str(json).unwrap();
        FeedPage::from_response(response).unwrap()
    }

    fn page(results: &[(&str, &str)], next_page: Option<&str>) -> FeedPage {
        let results: Vec<serde_json::Value> = results
            .iter()
            .map(|(uid, title)| {
                serde_json::json!({
                    "id": format!("id-{}", uid),
                    "uid": uid,
                    "type": "posts",
                    "first_publication_date": "2021-03-25T19:25:28+0000",
                    "data": {"title": title, "subtitle": "sub", "author": "author"}
                })
            })
            .collect();
        let body = serde_json::json!({
            "page": 1,
            "results_per_page": 2,
            "results_size": results.len(),
            "total_results_size": results.len(),
            "total_pages": 1,
            "next_page": next_page,
            "prev_page": null,
            "results": results,
        });
        page_from_json(&body.to_string())
    }

    fn uids(paginator: &FeedPaginator) -> Vec<&str> {
        paginator.visible().iter().map(|p| p.uid.as_str()).collect()
    }

    #[tokio::test]
    async fn terminal_cursor_makes_load_more_idempotent() {
        let store = ScriptedStore::new(vec![]);
        let mut paginator =
            FeedPaginator::from_initial_page(store.clone(), page(&[("a", "T1")], None)).unwrap();

        assert_eq!(paginator.load_more().await.unwrap(), LoadOutcome::EndOfFeed);
        assert_eq!(paginator.load_more().await.unwrap(), LoadOutcome::EndOfFeed);
        assert_eq!(uids(&paginator), vec!["a"]);
        assert_eq!(paginator.cursor(), &PageCursor::End);
        // The store was never consulted
        assert_eq!(store.fetch_count(), 0);
    }

    #[tokio::test]
    async fn pages_append_in_fetch_order() {
        let store = ScriptedStore::new(vec![
            ScriptedResponse::Page(page(&[("b", "T2"), ("c", "T3")], Some("http://x/page3"))),
            ScriptedResponse::Page(page(&[("d", "T4")], None)),
        ]);
        let mut paginator = FeedPaginator::from_initial_page(
            store.clone(),
            page(&[("a", "T1")], Some("http://x/page2")),
        )
        .unwrap();

        assert_eq!(paginator.load_more().await.unwrap(), LoadOutcome::Appended(2));
        assert_eq!(paginator.load_more().await.unwrap(), LoadOutcome::Appended(1));
        assert_eq!(uids(&paginator), vec!["a", "b", "c", "d"]);
        assert!(!paginator.has_more());
    }

    #[tokio::test]
    async fn fetch_failure_leaves_state_intact_and_retryable() {
        let store = ScriptedStore::new(vec![
            ScriptedResponse::Fail,
            ScriptedResponse::Page(page(&[("b", "T2")], None)),
        ]);
        let mut paginator = FeedPaginator::from_initial_page(
            store.clone(),
            page(&[("a", "T1")], Some("http://x/page2")),
        )
        .unwrap();

        let cursor_before = paginator.cursor().clone();
        assert!(paginator.load_more().await.is_err());
        assert_eq!(uids(&paginator), vec!["a"]);
        assert_eq!(paginator.cursor(), &cursor_before);

        // The same cursor works on retry
        assert_eq!(paginator.load_more().await.unwrap(), LoadOutcome::Appended(1));
        assert_eq!(uids(&paginator), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn malformed_page_appends_nothing() {
        // Second document is missing its subtitle: the whole page must be
        // rejected, not half-appended.
        let broken = page_from_json(
            r#"{
                "page": 2, "results_per_page": 2, "results_size": 2,
                "total_results_size": 3, "total_pages": 2,
                "next_page": null, "prev_page": null,
                "results": [
                    {"id": "id-b", "uid": "b", "type": "posts",
                     "first_publication_date": null,
                     "data": {"title": "T2", "subtitle": "S2", "author": "Y"}},
                    {"id": "id-c", "uid": "c", "type": "posts",
                     "first_publication_date": null,
                     "data": {"title": "T3", "author": "Z"}}
                ]
            }"#,
        );
        let store = ScriptedStore::new(vec![ScriptedResponse::Page(broken)]);
        let mut paginator = FeedPaginator::from_initial_page(
            store.clone(),
            page(&[("a", "T1")], Some("http://x/page2")),
        )
        .unwrap();

        let err = paginator.load_more().await.unwrap_err();
        assert!(err.to_string().contains("data.subtitle"));
        assert_eq!(uids(&paginator), vec!["a"]);
        assert!(paginator.has_more());
    }

    #[tokio::test]
    async fn spec_scenario_two_pages_then_terminal() {
        // Initial page: one post "a", continuation to page 2. Loading more
        // brings "b" and a null next_page; the feed is then exhausted.
        let initial = page_from_json(
            r#"{
                "page": 1, "results_per_page": 2, "results_size": 1,
                "total_results_size": 2, "total_pages": 2,
                "next_page": "http://x/page2", "prev_page": null,
                "results": [
                    {"id": "id-a", "uid": "a", "type": "posts",
                     "first_publication_date": "2021-03-25",
                     "data": {"title": "T1", "subtitle": "S1", "author": "X"}}
                ]
            }"#,
        );
        let second = page_from_json(
            r#"{
                "page": 2, "results_per_page": 2, "results_size": 1,
                "total_results_size": 2, "total_pages": 2,
                "next_page": null, "prev_page": "http://x/page1",
                "results": [
                    {"id": "id-b", "uid": "b", "type": "posts",
                     "first_publication_date": "2021-04-01",
                     "data": {"title": "T2", "subtitle": "S2", "author": "X"}}
                ]
            }"#,
        );
        let store = ScriptedStore::new(vec![ScriptedResponse::Page(second)]);
        let mut paginator = FeedPaginator::from_initial_page(store.clone(), initial).unwrap();

        assert_eq!(
            paginator.cursor().next_url().unwrap().as_str(),
            "http://x/page2"
        );

        assert_eq!(paginator.load_more().await.unwrap(), LoadOutcome::Appended(1));
        assert_eq!(uids(&paginator), vec!["a", "b"]);
        assert_eq!(paginator.cursor(), &PageCursor::End);

        assert_eq!(paginator.load_more().await.unwrap(), LoadOutcome::EndOfFeed);
        assert_eq!(uids(&paginator), vec!["a", "b"]);
        assert_eq!(store.fetch_count(), 1);
    }

    #[test]
    fn summary_mapping_extracts_exactly_the_feed_fields() {
        let document: RawDocument = serde_json::from_str(
            r#"{
                "id": "id-a",
                "uid": "how-to-prismic",
                "type": "posts",
                "first_publication_date": "2021-03-25T19:25:28+0000",
                "data": {
                    "title": "How to Prismic",
                    "subtitle": "A walkthrough",
                    "author": "Danilo Vieira",
                    "banner": {"url": "https://images.example/ignored.png"}
                }
            }"#,
        )
        .unwrap();

        let summary = map_summary(&document).unwrap();
        assert_eq!(summary.uid.as_str(), "how-to-prismic");
        assert_eq!(summary.title, "How to Prismic");
        assert_eq!(summary.subtitle, "A walkthrough");
        assert_eq!(summary.author, "Danilo Vieira");
        assert!(summary.first_publication_date.is_some());
    }

    #[test]
    fn summary_mapping_allows_null_publication_date() {
        let document: RawDocument = serde_json::from_str(
            r#"{
                "id": "id-d", "uid": "draft", "type": "posts",
                "first_publication_date": null,
                "data": {"title": "T", "subtitle": "S", "author": "A"}
            }"#,
        )
        .unwrap();
        assert!(map_summary(&document).unwrap().first_publication_date.is_none());
    }
}
