//! Short-lived in-memory store for generated documents.
//!
//! Documents are keyed by a random UUID and expire after the configured time
//! to live. The cache is bounded; once full, moka evicts the entries it
//! considers least valuable.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use featuredoc_render::DocumentTitle;
use moka::future::Cache;
use uuid::Uuid;

use crate::config::ServerConfig;

/// A rendered document awaiting download.
#[derive(Debug, Clone)]
pub struct GeneratedDocument {
    /// Title the document was rendered with.
    pub title: DocumentTitle,
    /// Number of scenarios in the document.
    pub scenario_count: usize,
    /// Encoded DOCX bytes.
    pub bytes: Bytes,
}

impl GeneratedDocument {
    /// Bundle a rendered document with its metadata.
    #[must_use]
    pub fn new(title: DocumentTitle, scenario_count: usize, bytes: impl Into<Bytes>) -> Self {
        Self {
            title,
            scenario_count,
            bytes: bytes.into(),
        }
    }
}

/// Expiring document cache shared by all request handlers.
///
/// Cloning is cheap; clones share the same underlying store.
#[derive(Debug, Clone)]
pub struct DocumentCache {
    inner: Cache<String, Arc<GeneratedDocument>>,
}

impl DocumentCache {
    /// Create a cache holding at most `capacity` documents for `ttl` each.
    #[must_use]
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Create a cache sized according to the server configuration.
    #[must_use]
    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(config.cache_capacity, config.cache_ttl)
    }

    /// Store a document under a freshly generated id and return the id.
    pub async fn insert(&self, document: GeneratedDocument) -> String {
        let id = Uuid::new_v4().to_string();
        self.inner.insert(id.clone(), Arc::new(document)).await;
        id
    }

    /// Fetch a document if it exists and has not expired.
    pub async fn get(&self, id: &str) -> Option<Arc<GeneratedDocument>> {
        self.inner.get(id).await
    }

    /// Approximate number of stored documents.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> GeneratedDocument {
        GeneratedDocument::new(DocumentTitle::new("demo"), 1, b"PK".to_vec())
    }

    #[tokio::test]
    async fn stores_and_returns_documents() {
        let cache = DocumentCache::new(4, Duration::from_secs(60));
        let id = cache.insert(document()).await;
        let Some(stored) = cache.get(&id).await else {
            panic!("document should be cached");
        };
        assert_eq!(stored.title.as_str(), "demo");
        assert_eq!(stored.scenario_count, 1);
        assert_eq!(stored.bytes.as_ref(), b"PK");
    }

    #[tokio::test]
    async fn generates_distinct_ids() {
        let cache = DocumentCache::new(4, Duration::from_secs(60));
        let first = cache.insert(document()).await;
        let second = cache.insert(document()).await;
        assert_ne!(first, second);
        assert!(Uuid::parse_str(&first).is_ok());
    }

    #[tokio::test]
    async fn unknown_ids_miss() {
        let cache = DocumentCache::new(4, Duration::from_secs(60));
        assert!(cache.get("missing").await.is_none());
    }

    #[tokio::test]
    async fn documents_expire_after_ttl() {
        let cache = DocumentCache::new(4, Duration::from_millis(50));
        let id = cache.insert(document()).await;
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(cache.get(&id).await.is_none());
    }
}
