use crate::error::ErrorResponse;
use axum::extract::FromRequestParts;
use axum::http::{request::Parts, StatusCode};
use axum::Json;
use indoc_core::models::Tenant;
use uuid::Uuid;

/// Tenant context resolved from the API key and stored in request extensions.
///
/// `uploader_id` is the identity associated with the presented key; documents
/// created through this request are attributed to it.
#[derive(Debug, Clone)]
pub struct TenantContext {
    pub tenant_id: Uuid,
    pub uploader_id: Uuid,
    pub tenant: Tenant,
}

// Implement FromRequestParts for TenantContext to work with Multipart.
// Extension cannot be used with Multipart, so we extract directly from
// request parts.
impl<S> FromRequestParts<S> for TenantContext
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<TenantContext>()
            .cloned()
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorResponse::new(
                        "Missing tenant context",
                        "MISSING_TENANT_CONTEXT",
                    )),
                )
            })
    }
}
