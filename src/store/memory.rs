use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::{ContentItem, ContentStore};

/// Process-local content store for local development and tests
#[derive(Default)]
pub struct InMemoryContentStore {
    items: RwLock<BTreeMap<String, ContentItem>>,
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn upsert(items: &mut BTreeMap<String, ContentItem>, key: &str, value: &str) {
    let item = ContentItem {
        key: key.to_string(),
        value: value.to_string(),
        updated_at: Utc::now(),
    };
    items.insert(key.to_string(), item);
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    async fn all_items(&self) -> Result<Vec<ContentItem>> {
        let items = self.items.read().await;
        Ok(items.values().cloned().collect())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.items.write().await;
        upsert(&mut items, key, value);
        tracing::debug!("Upserted content item with key: {}", key);
        Ok(())
    }

    async fn set_bulk(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if entries.is_empty() {
            return Ok(());
        }

        // Held across the whole batch so readers never observe half of it.
        let mut items = self.items.write().await;
        for (key, value) in entries {
            upsert(&mut items, key, value);
        }

        tracing::debug!("Upserted {} content items in bulk", entries.len());
        Ok(())
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}
