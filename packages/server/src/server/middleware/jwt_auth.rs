use crate::common::{Caller, MemberId, TenantId};
use crate::domains::auth::JwtService;
use axum::{middleware::Next, response::Response};
use std::sync::Arc;
use tracing::debug;

/// JWT authentication middleware
///
/// Extracts JWT token from Authorization header, verifies it, and adds a
/// `Caller` to request extensions. If no token or invalid token, request
/// continues without a `Caller`; protected routes then answer 401.
pub async fn jwt_auth_middleware(
    jwt_service: Arc<JwtService>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let caller = extract_caller(&request, &jwt_service);

    if let Some(caller) = caller {
        debug!(
            member_id = %caller.member_id,
            tenant_id = %caller.tenant_id,
            roles = ?caller.roles,
            "Authenticated caller"
        );
        request.extensions_mut().insert(caller);
    } else {
        debug!("No valid authentication token");
    }

    next.run(request).await
}

/// Extract and verify JWT token from request
fn extract_caller(
    request: &axum::http::Request<axum::body::Body>,
    jwt_service: &JwtService,
) -> Option<Caller> {
    let auth_header = request.headers().get("authorization")?;
    let auth_str = auth_header.to_str().ok()?;

    // Extract token (handle both "Bearer <token>" and raw token)
    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str);

    let claims = jwt_service.verify_token(token).ok()?;

    Some(Caller::new(
        MemberId::from_uuid(claims.member_id),
        TenantId::from_uuid(claims.tenant_id),
        claims.roles,
    ))
}
