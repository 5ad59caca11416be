//! Shared fixtures for handler tests

use anyhow::Result;
use async_trait::async_trait;
use axum::{body::Body, http::Request, response::Response, Router};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::app::build_router;
use crate::config::{CloudinaryConfig, Config, StoreBackend};
use crate::media::testing::StaticMediaHost;
use crate::media::MediaHost;
use crate::state::AppState;
use crate::store::{ContentItem, ContentStore};

pub fn test_config() -> Config {
    Config {
        store_backend: StoreBackend::Memory,
        spanner: None,
        cloudinary: CloudinaryConfig {
            cloud_name: "demo-cloud".to_string(),
            api_key: "123456".to_string(),
            api_secret: "shh".to_string(),
            folder: "school-website".to_string(),
            upload_base_url: "http://127.0.0.1:9/v1_1".to_string(),
        },
        cors_allowed_origins: vec!["*".to_string()],
        max_upload_bytes: 1024 * 1024,
        service_port: 5000,
        service_host: "127.0.0.1".to_string(),
    }
}

/// Full application router over the given store, with an always-succeeding media host
pub fn app_with(store: Arc<dyn ContentStore>) -> Router {
    app_with_media(store, Arc::new(StaticMediaHost::default()))
}

pub fn app_with_media(store: Arc<dyn ContentStore>, media_host: Arc<dyn MediaHost>) -> Router {
    build_router(AppState {
        store,
        media_host,
        config: Arc::new(test_config()),
    })
}

pub fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

pub async fn json_body<T: DeserializeOwned>(response: Response) -> T {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Store whose backend is permanently unreachable
pub struct BrokenStore;

#[async_trait]
impl ContentStore for BrokenStore {
    async fn all_items(&self) -> Result<Vec<ContentItem>> {
        Err(anyhow::anyhow!("database unreachable"))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<()> {
        Err(anyhow::anyhow!("database unreachable"))
    }

    async fn set_bulk(&self, _entries: &BTreeMap<String, String>) -> Result<()> {
        Err(anyhow::anyhow!("database unreachable"))
    }

    async fn health_check(&self) -> Result<()> {
        Err(anyhow::anyhow!("database unreachable"))
    }
}
