use axum::{extract::Extension, Json};
use serde::Serialize;

use crate::common::Role;
use crate::server::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    permissions: usize,
    roles: usize,
}

/// Health check endpoint
///
/// The authorization tables are validated before the router exists, so a
/// process that answers here is serving a consistent matrix.
pub async fn health_handler(Extension(state): Extension<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        permissions: state.matrix.catalog().len(),
        roles: Role::ALL.len(),
    })
}
