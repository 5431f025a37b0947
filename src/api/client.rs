// src/api/client.rs
//! HTTP client for the Prismic content API.
//!
//! A thin wrapper around reqwest that resolves the repository's master ref,
//! builds search queries, and follows continuation URLs. No parsing or
//! business logic lives here; bodies are handed to `parser` as text.

use super::parser;
use super::responses::RawDocument;
use super::{FeedPage, PostStore, QueryOptions};
use crate::error::AppError;
use crate::types::{ApiUrl, DocumentType, Uid};
use reqwest::{header, Client, Response};
use std::time::Duration;
use tokio::sync::OnceCell;
use url::Url;

/// A read-only client for one Prismic repository.
///
/// The master ref — the identifier of the currently published content
/// view — is resolved lazily on the first query and reused for the
/// lifetime of the client.
pub struct PrismicHttpClient {
    client: Client,
    base: ApiUrl,
    master_ref: OnceCell<String>,
}

impl PrismicHttpClient {
    /// Creates a client for the given repository endpoint.
    ///
    /// Every request carries `timeout`; the store specifies no timeout of
    /// its own, so an unresponsive host would otherwise hang a page load
    /// indefinitely.
    pub fn new(base: ApiUrl, timeout: Duration) -> Result<Self, AppError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base,
            master_ref: OnceCell::new(),
        })
    }

    /// Makes a GET request to an absolute URL.
    async fn get(&self, url: Url) -> Result<Response, AppError> {
        log::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        Ok(response)
    }

    /// The master ref, resolved once per client from the API entry point.
    async fn master_ref(&self) -> Result<&str, AppError> {
        let reference = self
            .master_ref
            .get_or_try_init(|| async {
                log::debug!("Resolving master ref from {}", self.base);
                let response = self.get(self.base.as_url().clone()).await?;
                let text = extract_response_text(response).await?;
                let info = parser::parse_api_info(text)?;
                info.master_ref()
                    .map(|r| r.reference.clone())
                    .ok_or_else(|| {
                        AppError::MalformedResponse(
                            "repository API info carries no master ref".to_string(),
                        )
                    })
            })
            .await?;
        Ok(reference)
    }

    async fn run_query(&self, url: Url) -> Result<FeedPage, AppError> {
        let response = self.get(url).await?;
        let text = extract_response_text(response).await?;
        let parsed = parser::parse_query_response(text)?;
        FeedPage::from_response(parsed)
    }
}

/// Builds a document-search URL for a type query.
///
/// Kept as a pure function so query construction is testable without a
/// network or a resolved ref.
pub fn build_type_query(
    search: &Url,
    master_ref: &str,
    doc_type: &DocumentType,
    options: &QueryOptions,
) -> Url {
    let mut url = search.clone();
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("ref", master_ref);
        pairs.append_pair("q", &format!("[[at(document.type,\"{}\")]]", doc_type));
        pairs.append_pair("pageSize", &options.page_size.to_string());
        if !options.fields.is_empty() {
            pairs.append_pair("fetch", &options.fields.join(","));
        }
    }
    url
}

/// Builds a document-search URL for a UID lookup. Full document, no projection.
pub fn build_uid_query(search: &Url, master_ref: &str, doc_type: &DocumentType, uid: &Uid) -> Url {
    let mut url = search.clone();
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("ref", master_ref);
        pairs.append_pair("q", &format!("[[at(my.{}.uid,\"{}\")]]", doc_type, uid));
        pairs.append_pair("pageSize", "1");
    }
    url
}

#[async_trait::async_trait]
impl PostStore for PrismicHttpClient {
    async fn query_by_type(
        &self,
        doc_type: &DocumentType,
        options: &QueryOptions,
    ) -> Result<FeedPage, AppError> {
        let master_ref = self.master_ref().await?.to_string();
        let url = build_type_query(&self.base.search_endpoint(), &master_ref, doc_type, options);
        self.run_query(url).await
    }

    async fn fetch_page(&self, cursor: &Url) -> Result<FeedPage, AppError> {
        // The continuation URL is opaque: sent exactly as received.
        self.run_query(cursor.clone()).await
    }

    async fn get_by_uid(&self, doc_type: &DocumentType, uid: &Uid) -> Result<RawDocument, AppError> {
        let master_ref = self.master_ref().await?.to_string();
        let url = build_uid_query(&self.base.search_endpoint(), &master_ref, doc_type, uid);
        let page = self.run_query(url).await?;

        page.results.into_iter().next().ok_or_else(|| AppError::NotFound {
            doc_type: doc_type.to_string(),
            uid: uid.to_string(),
        })
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text with metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
