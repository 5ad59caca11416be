pub mod memory;
pub mod spanner;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::{Config, StoreBackend};

pub use memory::InMemoryContentStore;
pub use spanner::SpannerContentStore;

/// One editable region of the site, identified by its content key
#[derive(Debug, Clone, PartialEq)]
pub struct ContentItem {
    pub key: String,
    /// Free text or an image URL
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

/// Flat key→value table holding every content item.
///
/// Writes are upserts on the key, so a key maps to at most one item. Concurrent
/// writes to the same key resolve last-write-wins in the backend.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Every stored item, ordered by key
    async fn all_items(&self) -> Result<Vec<ContentItem>>;

    /// Insert or overwrite a single item
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Insert or overwrite every entry as one unit: either all entries are
    /// written or none are. An empty batch succeeds without touching the backend.
    async fn set_bulk(&self, entries: &BTreeMap<String, String>) -> Result<()>;

    /// Verify the backend is reachable
    async fn health_check(&self) -> Result<()>;

    /// Mapping of key→value for every stored item
    async fn get_all(&self) -> Result<BTreeMap<String, String>> {
        let items = self.all_items().await?;
        if let Some(latest) = items.iter().map(|item| item.updated_at).max() {
            tracing::debug!("Content last updated at {}", latest.to_rfc3339());
        }
        Ok(items
            .into_iter()
            .map(|item| (item.key, item.value))
            .collect())
    }
}

/// Build the store selected by the configuration
pub async fn from_config(config: &Config) -> Result<Arc<dyn ContentStore>> {
    match config.store_backend {
        StoreBackend::Spanner => {
            let spanner_config = config
                .spanner
                .as_ref()
                .ok_or_else(|| anyhow::anyhow!("Spanner backend selected without Spanner configuration"))?;
            let store = SpannerContentStore::from_config(spanner_config).await?;
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory content store; content is lost on restart");
            Ok(Arc::new(InMemoryContentStore::new()))
        }
    }
}
