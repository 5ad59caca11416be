use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha2::{Digest, Sha256};

use super::{ImageUpload, MediaHost};
use crate::config::CloudinaryConfig;

/// Image formats Cloudinary is told to accept for this site
pub const ALLOWED_FORMATS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

#[derive(Debug, Deserialize)]
struct UploadResult {
    secure_url: String,
    #[serde(default)]
    public_id: String,
}

#[derive(Debug, Deserialize)]
struct CloudinaryErrorBody {
    error: CloudinaryErrorDetail,
}

#[derive(Debug, Deserialize)]
struct CloudinaryErrorDetail {
    message: String,
}

/// Client for Cloudinary's signed image upload API
pub struct CloudinaryClient {
    config: CloudinaryConfig,
    http_client: reqwest::Client,
}

impl CloudinaryClient {
    pub fn new(config: CloudinaryConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    fn upload_url(&self) -> String {
        format!(
            "{}/{}/image/upload",
            self.config.upload_base_url, self.config.cloud_name
        )
    }

    /// Parameters covered by the signature, sorted by name
    fn signed_params(&self, timestamp: i64) -> Vec<(&'static str, String)> {
        vec![
            ("allowed_formats", ALLOWED_FORMATS.join(",")),
            ("folder", self.config.folder.clone()),
            ("timestamp", timestamp.to_string()),
        ]
    }
}

/// `name=value` pairs joined with `&`, in the order given
fn string_to_sign(params: &[(&str, String)]) -> String {
    params
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join("&")
}

fn sign(params: &[(&str, String)], api_secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(string_to_sign(params).as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

#[async_trait]
impl MediaHost for CloudinaryClient {
    async fn upload(&self, image: ImageUpload) -> Result<String> {
        let timestamp = chrono::Utc::now().timestamp();
        let params = self.signed_params(timestamp);
        let signature = sign(&params, &self.config.api_secret);

        let file_part = Part::bytes(image.bytes)
            .file_name(image.file_name.clone())
            .mime_str(&image.content_type)
            .with_context(|| format!("Invalid content type '{}'", image.content_type))?;

        let mut form = Form::new()
            .part("file", file_part)
            .text("api_key", self.config.api_key.clone())
            .text("signature", signature)
            .text("signature_algorithm", "sha256");
        for (name, value) in params {
            form = form.text(name, value);
        }

        tracing::debug!("Uploading {} to Cloudinary", image.file_name);

        let response = self
            .http_client
            .post(self.upload_url())
            .multipart(form)
            .send()
            .await
            .context("Failed to reach Cloudinary")?;

        let status = response.status();

        if status.is_success() {
            let result = response
                .json::<UploadResult>()
                .await
                .context("Failed to parse Cloudinary upload response")?;

            tracing::info!(
                "Uploaded {} to Cloudinary as {}",
                image.file_name,
                result.public_id
            );
            return Ok(result.secure_url);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<CloudinaryErrorBody>(&body)
            .map(|err| err.error.message)
            .unwrap_or(body);

        Err(anyhow::anyhow!(
            "Cloudinary rejected upload ({}): {}",
            status,
            message
        ))
    }
}
