// Hypermedia cache - previously fetched documents keyed by home URI

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Storage for decoded hypermedia documents, owned by the calling context
#[async_trait]
pub trait HypermediaCache: Send + Sync {
    async fn get(&self, home_uri: &str) -> Option<serde_json::Value>;
    async fn put(&self, home_uri: &str, document: serde_json::Value);
}

/// In-process cache shared between clients of the same process
#[derive(Debug, Default)]
pub struct MemoryCache {
    documents: RwLock<HashMap<String, serde_json::Value>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl HypermediaCache for MemoryCache {
    async fn get(&self, home_uri: &str) -> Option<serde_json::Value> {
        self.documents.read().await.get(home_uri).cloned()
    }

    async fn put(&self, home_uri: &str, document: serde_json::Value) {
        self.documents.write().await.insert(home_uri.to_string(), document);
    }
}

/// Cache that never stores anything; every connect fetches
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCache;

#[async_trait]
impl HypermediaCache for NoCache {
    async fn get(&self, _home_uri: &str) -> Option<serde_json::Value> {
        None
    }

    async fn put(&self, _home_uri: &str, _document: serde_json::Value) {}
}
