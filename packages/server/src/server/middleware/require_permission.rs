use std::sync::Arc;

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use crate::common::{authorize, AuthError, Caller, RoleMatrix};
use crate::server::error::ApiError;

/// Route gate
///
/// Runs once per matched route, before its handler, against the permission
/// the route was registered with. Must be layered inside `jwt_auth_middleware`
/// so the `Caller` extension is already in place.
pub async fn require_permission(
    matrix: Arc<RoleMatrix>,
    permission: &'static str,
    request: Request,
    next: Next,
) -> Response {
    let decision = authorize(&matrix, request.extensions().get::<Caller>(), permission);
    let Err(err) = decision.into_result(permission) else {
        return next.run(request).await;
    };

    let caller = request.extensions().get::<Caller>();
    if err == AuthError::Unauthenticated {
        debug!(
            method = %request.method(),
            path = %request.uri().path(),
            permission,
            "Rejected unauthenticated request"
        );
    } else {
        warn!(
            method = %request.method(),
            path = %request.uri().path(),
            permission,
            member_id = ?caller.map(|c| c.member_id),
            roles = ?caller.map(|c| &c.roles),
            "Permission denied"
        );
    }

    ApiError::from(err).into_response()
}
