use axum::{extract::Extension, Json};
use serde::Serialize;

use crate::common::auth::{AuthError, MatrixExport};
use crate::common::{Caller, MemberId, TenantId};
use crate::server::app::AppState;
use crate::server::error::ApiError;

/// The role matrix as served to the frontend.
///
/// Public: the table is advisory UI data, and the backend gate enforces
/// regardless of what the client renders.
pub async fn matrix_handler(Extension(state): Extension<AppState>) -> Json<MatrixExport> {
    Json(state.matrix.export())
}

#[derive(Debug, Serialize)]
pub struct MyPermissionsResponse {
    pub member_id: MemberId,
    pub tenant_id: TenantId,
    pub roles: Vec<String>,
    pub permissions: Vec<&'static str>,
}

/// Effective permissions of the authenticated caller
pub async fn my_permissions_handler(
    Extension(state): Extension<AppState>,
    caller: Option<Extension<Caller>>,
) -> Result<Json<MyPermissionsResponse>, ApiError> {
    let Some(Extension(caller)) = caller else {
        return Err(AuthError::Unauthenticated.into());
    };

    let permissions = state
        .matrix
        .effective_permissions(&caller.roles)
        .into_iter()
        .collect();

    Ok(Json(MyPermissionsResponse {
        member_id: caller.member_id,
        tenant_id: caller.tenant_id,
        roles: caller.roles,
        permissions,
    }))
}
