//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::{Extension, Request},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware::{self, Next},
    routing::get,
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::common::{ConfigurationDefect, RoleMatrix};
use crate::domains::auth::JwtService;
use crate::domains::records::{RecordStore, ResourceKind};
use crate::server::middleware::jwt_auth_middleware;
use crate::server::routes::{
    health_handler, matrix_handler, my_permissions_handler, resource_routes, validate_routes,
    ProtectedRouter,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub matrix: Arc<RoleMatrix>,
    pub store: Arc<RecordStore>,
}

/// Every permission-guarded route the API serves.
///
/// Kept separate from `build_app` so the route table can be inspected without
/// starting a server (see `clinic_cli check`).
pub fn protected_routes(matrix: Arc<RoleMatrix>) -> ProtectedRouter {
    ResourceKind::ALL
        .into_iter()
        .fold(ProtectedRouter::new(matrix), resource_routes)
}

/// Build the Axum application router
///
/// Refuses to build when any protected route requires a permission the
/// catalog does not define.
pub fn build_app(
    matrix: Arc<RoleMatrix>,
    jwt_service: Arc<JwtService>,
    allowed_origins: &[String],
) -> Result<Router, ConfigurationDefect> {
    let (api, requirements) = protected_routes(matrix.clone()).into_parts();
    validate_routes(matrix.catalog(), &requirements)?;
    info!(
        routes = requirements.len(),
        permissions = matrix.catalog().len(),
        "Route permissions validated"
    );

    let app_state = AppState {
        matrix,
        store: Arc::new(RecordStore::new()),
    };

    let cors = CorsLayer::new()
        .allow_origin(allow_origin(allowed_origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/api/permissions/matrix", get(matrix_handler))
        .route("/api/me/permissions", get(my_permissions_handler))
        .merge(api)
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |request: Request, next: Next| {
            jwt_auth_middleware(jwt_service.clone(), request, next)
        }))
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

fn allow_origin(allowed_origins: &[String]) -> AllowOrigin {
    if allowed_origins.is_empty() {
        return AllowOrigin::any();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    AllowOrigin::list(origins)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_resource_kind_gets_five_routes() {
        let matrix = Arc::new(RoleMatrix::clinic().unwrap());
        let routes = protected_routes(matrix);
        assert_eq!(routes.requirements().len(), ResourceKind::ALL.len() * 5);
    }

    #[test]
    fn clinic_route_table_is_consistent() {
        let matrix = Arc::new(RoleMatrix::clinic().unwrap());
        let routes = protected_routes(matrix.clone());
        assert!(validate_routes(matrix.catalog(), routes.requirements()).is_ok());
    }

    #[test]
    fn build_app_rejects_catalog_without_route_permissions() {
        use crate::common::auth::PermissionCatalog;

        // Substitute catalog missing every resource permission but one.
        let catalog = PermissionCatalog::from_permissions(&["patients.read"]).unwrap();
        let matrix = Arc::new(RoleMatrix::builder(catalog).build().unwrap());
        let jwt = Arc::new(JwtService::new("secret", "test".to_string()));

        let result = build_app(matrix, jwt, &[]);
        assert!(matches!(
            result,
            Err(ConfigurationDefect::UnknownRouteRequirement { .. })
        ));
    }
}
