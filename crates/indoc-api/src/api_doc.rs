//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use indoc_core::models;

/// Returns the OpenAPI spec served at `/api/openapi.json`.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "inDoc API",
        version = "0.1.0",
        description = "Multi-tenant document ingestion API with content-based deduplication. Uploads are fingerprinted with SHA-256, deduplicated per tenant, and dispatched to an asynchronous processing queue."
    ),
    paths(
        // Files
        handlers::upload::upload_file,
        handlers::documents::list_files,
        handlers::documents::get_file,
        handlers::documents::delete_file,
        // Analytics
        handlers::analytics::get_summary,
        handlers::analytics::get_processing,
    ),
    components(
        schemas(
            // Core models
            models::Classification,
            models::DocumentStatus,
            models::DocumentResponse,
            models::ExistingDocument,
            models::UploadResponse,
            models::AnalyticsTotals,
            models::AnalyticsSummary,
            models::ProcessingSummary,
            // Handler responses
            handlers::documents::DocumentListResponse,
            handlers::documents::DeleteResponse,
            // Error
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "files", description = "Document upload, listing, retrieval, and deletion"),
        (name = "analytics", description = "Per-tenant document and processing statistics")
    )
)]
struct ApiDoc;
