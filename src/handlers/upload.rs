use crate::error::{ApiError, ErrorResponse};
use crate::media::{relay_upload, ImageUpload};
use crate::models::{UploadForm, UploadResponse};
use crate::routes;
use crate::state::AppState;
use anyhow::{anyhow, Context};
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    Json,
};

/// POST /api/upload handler - Relay an image to the media host and store its URL
///
/// Accepts multipart/form-data with:
/// - `image`: the image file (required)
/// - `key`: the content key the resulting URL is saved under (required)
#[utoipa::path(
    post,
    path = routes::UPLOAD,
    request_body(
        content = UploadForm,
        content_type = "multipart/form-data",
        description = "Image file plus the content key to record its URL under",
    ),
    responses(
        (status = 200, description = "Image uploaded and URL saved", body = UploadResponse),
        (status = 500, description = "Missing field, media host failure or database error", body = ErrorResponse)
    ),
    tag = "upload"
)]
pub async fn upload_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<UploadResponse>), ApiError> {
    let multipart = multipart
        .map_err(|rejection| ApiError::UploadFailed(anyhow!("Rejected upload body: {}", rejection.body_text())))?;

    let (key, image) = read_upload_form(multipart)
        .await
        .map_err(ApiError::UploadFailed)?;

    let image_url = relay_upload(state.store.as_ref(), state.media_host.as_ref(), &key, image)
        .await
        .map_err(ApiError::UploadFailed)?;

    tracing::info!("Uploaded image for key {}: {}", key, image_url);
    Ok((
        StatusCode::OK,
        Json(UploadResponse {
            success: true,
            image_url,
        }),
    ))
}

async fn read_upload_form(mut multipart: Multipart) -> anyhow::Result<(String, ImageUpload)> {
    let mut key: Option<String> = None;
    let mut image: Option<ImageUpload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .context("Failed to read multipart data")?
    {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "image" => {
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let file_name = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "unnamed".to_string());
                let bytes = field.bytes().await.context("Failed to read image data")?;

                image = Some(ImageUpload {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            "key" => {
                key = Some(field.text().await.context("Failed to read key field")?);
            }
            _ => {
                tracing::debug!("Ignoring unknown upload field: {}", field_name);
            }
        }
    }

    let key = key.ok_or_else(|| anyhow!("Upload form is missing the 'key' field"))?;
    let image = image.ok_or_else(|| anyhow!("Upload form is missing the 'image' field"))?;
    Ok((key, image))
}
