use utoipa::OpenApi;

use crate::error::{ErrorResponse, HealthResponse, UnhealthyResponse};
use crate::handlers;
use crate::models::{
    BulkSaveRequest, BulkSaveResponse, SaveContentRequest, SaveContentResponse, UploadForm,
    UploadResponse,
};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "site-content-store API",
        version = "1.0.0",
        description = "Editable website text and images, stored by content key"
    ),
    paths(
        handlers::health::health_handler,
        handlers::content::get_all_handler,
        handlers::content::save_handler,
        handlers::content::bulk_save_handler,
        handlers::upload::upload_handler
    ),
    components(
        schemas(
            SaveContentRequest,
            SaveContentResponse,
            BulkSaveRequest,
            BulkSaveResponse,
            UploadForm,
            UploadResponse,
            ErrorResponse,
            HealthResponse,
            UnhealthyResponse
        )
    ),
    tags(
        (name = "health", description = "Health check operations"),
        (name = "content", description = "Content key-value operations"),
        (name = "upload", description = "Image upload relay")
    )
)]
pub struct ApiDoc;
