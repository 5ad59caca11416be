use crate::error::{ApiError, ErrorResponse};
use crate::extract::ContentJson;
use crate::models::{BulkSaveRequest, BulkSaveResponse, SaveContentRequest, SaveContentResponse};
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use std::collections::BTreeMap;

/// GET /api/content handler - Every stored key with its value
#[utoipa::path(
    get,
    path = routes::CONTENT,
    responses(
        (status = 200, description = "All content as a key to value object", body = BTreeMap<String, String>),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "content"
)]
pub async fn get_all_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<BTreeMap<String, String>>), ApiError> {
    let content = state.store.get_all().await.map_err(ApiError::LoadFailed)?;

    tracing::info!("Loaded {} content items", content.len());
    Ok((StatusCode::OK, Json(content)))
}

/// POST /api/content handler - Upsert one content item
#[utoipa::path(
    post,
    path = routes::CONTENT,
    request_body = SaveContentRequest,
    responses(
        (status = 200, description = "Content saved", body = SaveContentResponse),
        (status = 500, description = "Malformed body or database error", body = ErrorResponse)
    ),
    tag = "content"
)]
pub async fn save_handler(
    State(state): State<AppState>,
    ContentJson(request): ContentJson<SaveContentRequest>,
) -> Result<(StatusCode, Json<SaveContentResponse>), ApiError> {
    state
        .store
        .set(&request.key, &request.value)
        .await
        .map_err(ApiError::SaveFailed)?;

    tracing::info!("Saved content with key: {}", request.key);
    Ok((
        StatusCode::OK,
        Json(SaveContentResponse {
            success: true,
            message: format!("{} saved!", request.key),
        }),
    ))
}

/// POST /api/content/bulk handler - Upsert many content items as one unit
#[utoipa::path(
    post,
    path = routes::CONTENT_BULK,
    request_body = BulkSaveRequest,
    responses(
        (status = 200, description = "All entries saved", body = BulkSaveResponse),
        (status = 500, description = "Malformed body or database error; nothing was saved", body = ErrorResponse)
    ),
    tag = "content"
)]
pub async fn bulk_save_handler(
    State(state): State<AppState>,
    ContentJson(request): ContentJson<BulkSaveRequest>,
) -> Result<(StatusCode, Json<BulkSaveResponse>), ApiError> {
    state
        .store
        .set_bulk(&request.data)
        .await
        .map_err(ApiError::SaveFailed)?;

    tracing::info!("Saved {} content items in bulk", request.data.len());
    Ok((
        StatusCode::OK,
        Json(BulkSaveResponse {
            success: true,
            message: "All content saved!".to_string(),
        }),
    ))
}
