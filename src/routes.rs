// Route path constants - single source of truth for all API paths

pub const HEALTH: &str = "/health";
pub const CONTENT: &str = "/api/content";
pub const CONTENT_BULK: &str = "/api/content/bulk";
pub const UPLOAD: &str = "/api/upload";
pub const SWAGGER_UI: &str = "/swagger-ui";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";
