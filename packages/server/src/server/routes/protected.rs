//! Permission-guarded route registration.
//!
//! Every protected endpoint is registered together with the single permission
//! it requires. The registration both installs the gate on that method/path
//! and records a [`RouteRequirement`], so the complete route table can be
//! checked against the permission catalog before the server accepts traffic.

use std::sync::Arc;

use axum::{
    extract::Request,
    handler::Handler,
    http::Method,
    middleware::{self, Next},
    routing::{self, MethodRouter},
    Router,
};
use serde::Serialize;

use crate::common::auth::{ConfigurationDefect, PermissionCatalog};
use crate::common::RoleMatrix;
use crate::server::middleware::require_permission;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteRequirement {
    pub method: String,
    pub path: String,
    pub permission: &'static str,
}

pub struct ProtectedRouter {
    router: Router,
    matrix: Arc<RoleMatrix>,
    requirements: Vec<RouteRequirement>,
}

impl ProtectedRouter {
    pub fn new(matrix: Arc<RoleMatrix>) -> Self {
        Self {
            router: Router::new(),
            matrix,
            requirements: Vec::new(),
        }
    }

    pub fn get<H, T>(self, path: &str, permission: &'static str, handler: H) -> Self
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        self.protect(Method::GET, path, permission, routing::get(handler))
    }

    pub fn post<H, T>(self, path: &str, permission: &'static str, handler: H) -> Self
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        self.protect(Method::POST, path, permission, routing::post(handler))
    }

    pub fn put<H, T>(self, path: &str, permission: &'static str, handler: H) -> Self
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        self.protect(Method::PUT, path, permission, routing::put(handler))
    }

    pub fn delete<H, T>(self, path: &str, permission: &'static str, handler: H) -> Self
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        self.protect(Method::DELETE, path, permission, routing::delete(handler))
    }

    fn protect(
        mut self,
        method: Method,
        path: &str,
        permission: &'static str,
        method_router: MethodRouter,
    ) -> Self {
        let matrix = self.matrix.clone();
        let gated = method_router.route_layer(middleware::from_fn(
            move |request: Request, next: Next| {
                require_permission(matrix.clone(), permission, request, next)
            },
        ));

        self.router = self.router.route(path, gated);
        self.requirements.push(RouteRequirement {
            method: method.to_string(),
            path: path.to_string(),
            permission,
        });
        self
    }

    pub fn requirements(&self) -> &[RouteRequirement] {
        &self.requirements
    }

    pub fn into_parts(self) -> (Router, Vec<RouteRequirement>) {
        (self.router, self.requirements)
    }
}

/// Every route whose required permission is missing from the catalog.
pub fn route_defects(
    catalog: &PermissionCatalog,
    requirements: &[RouteRequirement],
) -> Vec<ConfigurationDefect> {
    requirements
        .iter()
        .filter(|route| !catalog.contains(route.permission))
        .map(|route| ConfigurationDefect::UnknownRouteRequirement {
            method: route.method.clone(),
            path: route.path.clone(),
            permission: route.permission.to_string(),
        })
        .collect()
}

/// Fail with the first route whose requirement is not in the catalog.
pub fn validate_routes(
    catalog: &PermissionCatalog,
    requirements: &[RouteRequirement],
) -> Result<(), ConfigurationDefect> {
    match route_defects(catalog, requirements).into_iter().next() {
        Some(defect) => Err(defect),
        None => Ok(()),
    }
}
