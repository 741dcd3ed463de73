use crate::auth::models::TenantContext;
use crate::error::HttpAppError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use indoc_core::AppError;
use indoc_db::TenantRepository;
use std::sync::Arc;

pub const API_KEY_HEADER: &str = "X-API-Key";

#[derive(Clone)]
pub struct AuthState {
    pub tenant_repository: TenantRepository,
}

/// Resolve the `X-API-Key` header to an active tenant and attach the
/// [`TenantContext`] to the request extensions.
pub async fn api_key_middleware(
    State(auth_state): State<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let api_key = match request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|h| h.to_str().ok())
    {
        Some(key) if !key.is_empty() => key.to_string(),
        _ => {
            return HttpAppError(AppError::Unauthorized(
                "Missing X-API-Key header".to_string(),
            ))
            .into_response();
        }
    };

    let tenant = match auth_state.tenant_repository.get_by_api_key(&api_key).await {
        Ok(Some(tenant)) => tenant,
        Ok(None) => {
            tracing::debug!("API key did not resolve to an active tenant");
            return HttpAppError(AppError::Unauthorized("Invalid API key".to_string()))
                .into_response();
        }
        Err(e) => {
            return HttpAppError(e).into_response();
        }
    };

    let tenant_context = TenantContext {
        tenant_id: tenant.id,
        uploader_id: tenant.owner_id,
        tenant,
    };

    request.extensions_mut().insert(tenant_context);
    next.run(request).await
}
