// src/api/cache.rs
//! Revalidation cache for post-detail fetches.
//!
//! A fetched detail document is treated as fresh for a configurable
//! interval (default thirty minutes) before the store is consulted again.
//! Raw document JSON is cached on disk keyed by type + UID; on a hit the
//! JSON is re-parsed through the same serde schemas used for live
//! responses, so the domain model is never serialized. Feed queries are
//! never cached — the feed is always read live.

use super::responses::RawDocument;
use super::{FeedPage, PostStore, PrismicHttpClient, QueryOptions};
use crate::error::AppError;
use crate::types::{DocumentType, Uid};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use url::Url;

// ---------------------------------------------------------------------------
// Disk cache
// ---------------------------------------------------------------------------

/// TTL-based file cache for raw response strings.
///
/// Cache operations are best-effort: read/write failures are silently
/// ignored so a broken cache never prevents fresh store calls.
pub struct DiskCache {
    cache_dir: PathBuf,
    ttl_secs: u64,
}

#[derive(serde::Serialize, serde::Deserialize)]
struct CacheEntry {
    data: String,
    cached_at: u64,
}

impl DiskCache {
    /// Creates a cache in `$XDG_CACHE_HOME/prismic2page` (or `~/.cache/prismic2page`).
    ///
    /// On creation, expired entries are purged to prevent unbounded disk growth.
    pub async fn new(ttl_secs: u64) -> Result<Self, std::io::Error> {
        let cache_dir = Self::default_cache_dir();
        tokio::fs::create_dir_all(&cache_dir).await?;
        let cache = Self { cache_dir, ttl_secs };
        cache.purge_expired().await;
        Ok(cache)
    }

    fn default_cache_dir() -> PathBuf {
        std::env::var("XDG_CACHE_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
                PathBuf::from(home).join(".cache")
            })
            .join("prismic2page")
    }

    /// Returns cached data if the entry exists and has not expired.
    pub async fn get(&self, key: &str) -> Option<String> {
        let path = self.key_to_path(key);
        let content = tokio::fs::read_to_string(&path).await.ok()?;
        let entry: CacheEntry = serde_json::from_str(&content).ok()?;
        let now = SystemTime::now().duration_since(UNIX_EPOCH).ok()?.as_secs();
        if now.saturating_sub(entry.cached_at) > self.ttl_secs {
            let _ = tokio::fs::remove_file(&path).await;
            return None;
        }
        Some(entry.data)
    }

    /// Stores data in the cache. Errors are silently ignored (best-effort).
    pub async fn set(&self, key: &str, data: &str) {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        let entry = CacheEntry {
            data: data.to_string(),
            cached_at: now,
        };
        if let Ok(json) = serde_json::to_string(&entry) {
            let _ = tokio::fs::write(self.key_to_path(key), json).await;
        }
    }

    /// Removes all expired cache entries from disk.
    async fn purge_expired(&self) {
        let now = match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(d) => d.as_secs(),
            Err(_) => return,
        };

        let mut dir = match tokio::fs::read_dir(&self.cache_dir).await {
            Ok(d) => d,
            Err(_) => return,
        };

        while let Ok(Some(entry)) = dir.next_entry().await {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Ok(content) = tokio::fs::read_to_string(&path).await {
                if let Ok(cached) = serde_json::from_str::<CacheEntry>(&content) {
                    if now.saturating_sub(cached.cached_at) > self.ttl_secs {
                        let _ = tokio::fs::remove_file(&path).await;
                    }
                }
            }
        }
    }

    fn key_to_path(&self, key: &str) -> PathBuf {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        self.cache_dir.join(format!("{:016x}.json", hasher.finish()))
    }
}

// ---------------------------------------------------------------------------
// Cached post store
// ---------------------------------------------------------------------------

/// A [`PostStore`] that serves detail documents from the revalidation
/// cache while they are fresh. Feed queries pass straight through.
pub struct CachedPostStore {
    inner: PrismicHttpClient,
    cache: DiskCache,
}

impl CachedPostStore {
    /// Wraps an HTTP client with the revalidation cache.
    ///
    /// `ttl_secs` is the freshness interval for detail documents.
    pub async fn new(inner: PrismicHttpClient, ttl_secs: u64) -> Result<Self, AppError> {
        let cache = DiskCache::new(ttl_secs)
            .await
            .map_err(|e| AppError::InternalError {
                message: format!("Failed to initialize revalidation cache: {}", e),
                source: None,
            })?;
        Ok(Self { inner, cache })
    }
}

#[async_trait::async_trait]
impl PostStore for CachedPostStore {
    async fn query_by_type(
        &self,
        doc_type: &DocumentType,
        options: &QueryOptions,
    ) -> Result<FeedPage, AppError> {
        self.inner.query_by_type(doc_type, options).await
    }

    async fn fetch_page(&self, cursor: &Url) -> Result<FeedPage, AppError> {
        self.inner.fetch_page(cursor).await
    }

    async fn get_by_uid(&self, doc_type: &DocumentType, uid: &Uid)
        -> Result<RawDocument, AppError> {
        let cache_key = format!("doc_{}_{}", doc_type, uid);

        if let Some(cached) = self.cache.get(&cache_key).await {
            log::debug!("Revalidation cache hit: {}", cache_key);
            let document: RawDocument = serde_json::from_str(&cached)
                .map_err(|e| AppError::MalformedResponse(format!("cached document: {}", e)))?;
            return Ok(document);
        }

        log::debug!("Revalidation cache miss: {}", cache_key);
        let document = self.inner.get_by_uid(doc_type, uid).await?;

        // The wire schemas round-trip, so the cache stores the document in
        // the same shape the store sends it.
        if let Ok(json) = serde_json::to_string(&document) {
            self.cache.set(&cache_key, &json).await;
        }

        Ok(document)
    }
}
