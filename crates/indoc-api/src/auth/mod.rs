//! API-key tenant scoping.
//!
//! Every protected request carries an `X-API-Key` header that resolves to an
//! active tenant. This is request scoping, not an authorization system: there
//! are no roles or permissions, only the tenant boundary.

mod middleware;
mod models;

pub use middleware::{api_key_middleware, AuthState};
pub use models::TenantContext;
