use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Request body for saving a single content item
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct SaveContentRequest {
    #[schema(example = "schoolName")]
    pub key: String,
    #[schema(example = "Springfield Elementary")]
    pub value: String,
}

/// Response type for successful single saves
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct SaveContentResponse {
    pub success: bool,
    #[schema(example = "schoolName saved!")]
    pub message: String,
}

/// Request body for saving many content items at once
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct BulkSaveRequest {
    pub data: BTreeMap<String, String>,
}

/// Response type for successful bulk saves
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct BulkSaveResponse {
    pub success: bool,
    #[schema(example = "All content saved!")]
    pub message: String,
}

/// Multipart form accepted by the upload endpoint (documentation only)
#[derive(utoipa::ToSchema)]
#[allow(dead_code)]
pub struct UploadForm {
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
    #[schema(example = "heroImage")]
    pub key: String,
}

/// Response type for successful image uploads
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub image_url: String,
}
