pub mod cloudinary;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::store::ContentStore;

pub use cloudinary::CloudinaryClient;

/// An image received from the browser, ready to be forwarded
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Third-party host that stores image bytes and hands back a durable URL
#[async_trait]
pub trait MediaHost: Send + Sync {
    async fn upload(&self, image: ImageUpload) -> Result<String>;
}

/// Forward an image to the media host and record its URL under `key`
///
/// The store is only written after the host accepted the image, so a failed
/// upload leaves the existing content item untouched. No retries.
pub async fn relay_upload(
    store: &dyn ContentStore,
    host: &dyn MediaHost,
    key: &str,
    image: ImageUpload,
) -> Result<String> {
    let file_name = image.file_name.clone();
    let url = host
        .upload(image)
        .await
        .with_context(|| format!("Failed to upload '{}' to media host", file_name))?;

    store
        .set(key, &url)
        .await
        .with_context(|| format!("Failed to record image URL for key '{}'", key))?;

    tracing::debug!("Recorded image URL for key {}: {}", key, url);
    Ok(url)
}

#[cfg(test)]
pub mod testing {
    //! Media host stand-ins shared by the relay and handler tests

    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Accepts every upload and returns a URL derived from the file name
    #[derive(Default)]
    pub struct StaticMediaHost {
        pub calls: AtomicUsize,
    }

    #[async_trait]
    impl MediaHost for StaticMediaHost {
        async fn upload(&self, image: ImageUpload) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!(
                "https://media.example.com/school-website/{}",
                image.file_name
            ))
        }
    }

    /// Rejects every upload, like an unreachable host
    pub struct FailingMediaHost;

    #[async_trait]
    impl MediaHost for FailingMediaHost {
        async fn upload(&self, _image: ImageUpload) -> Result<String> {
            Err(anyhow::anyhow!("connection refused"))
        }
    }
}
