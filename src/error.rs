use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Error response type
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response type for health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Response type for unhealthy status
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct UnhealthyResponse {
    pub status: String,
    pub error: String,
}

/// Failure reported by a content or upload endpoint
///
/// Every variant becomes a 500 with a fixed message. The wrapped cause is
/// logged and never sent to the client.
#[derive(Debug)]
pub enum ApiError {
    /// Reading the content table failed
    LoadFailed(anyhow::Error),
    /// A single or bulk write failed, or its request body was unusable
    SaveFailed(anyhow::Error),
    /// Relaying the image or recording its URL failed
    UploadFailed(anyhow::Error),
}

impl ApiError {
    pub fn public_message(&self) -> &'static str {
        match self {
            ApiError::LoadFailed(_) => "Failed to load content",
            ApiError::SaveFailed(_) => "Failed to save content",
            ApiError::UploadFailed(_) => "Image upload failed",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.public_message();
        let cause = match &self {
            ApiError::LoadFailed(err) | ApiError::SaveFailed(err) | ApiError::UploadFailed(err) => err,
        };
        tracing::error!("{}: {:#}", message, cause);

        let body = Json(ErrorResponse {
            error: message.to_string(),
        });

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
