//! Test harness for driving the API in-process.
//!
//! Each harness builds its own router (and therefore its own empty record
//! store) and mints tokens with a fixed test secret. Requests go through the
//! full middleware stack via `tower::ServiceExt::oneshot`; no socket is bound.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use clinic_core::common::{Role, RoleMatrix};
use clinic_core::domains::auth::{Claims, JwtService};
use clinic_core::server::build_app;

pub const TEST_SECRET: &str = "test_secret";
pub const TEST_ISSUER: &str = "test_issuer";

pub struct TestHarness {
    pub app: Router,
    pub jwt: Arc<JwtService>,
    /// Tenant used by `token`
    pub tenant_id: Uuid,
}

impl TestHarness {
    /// Harness backed by the production role matrix.
    pub fn new() -> Self {
        Self::with_matrix(RoleMatrix::clinic().expect("clinic matrix is valid"))
    }

    /// Harness backed by a substitute matrix.
    pub fn with_matrix(matrix: RoleMatrix) -> Self {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let jwt = Arc::new(JwtService::new(TEST_SECRET, TEST_ISSUER.to_string()));
        let app = build_app(Arc::new(matrix), jwt.clone(), &[]).expect("route table is valid");

        Self {
            app,
            jwt,
            tenant_id: Uuid::new_v4(),
        }
    }

    pub fn token(&self, roles: &[Role]) -> String {
        self.token_for_tenant(self.tenant_id, roles)
    }

    pub fn token_for_tenant(&self, tenant_id: Uuid, roles: &[Role]) -> String {
        self.jwt
            .create_token(Uuid::new_v4(), tenant_id, roles)
            .expect("Failed to create token")
    }

    /// Token carrying arbitrary role strings, as a misconfigured identity
    /// provider could issue.
    pub fn raw_token(&self, roles: &[&str]) -> String {
        let now = Utc::now();
        let member_id = Uuid::new_v4();
        let claims = Claims {
            sub: member_id.to_string(),
            member_id,
            tenant_id: self.tenant_id,
            roles: roles.iter().map(|r| r.to_string()).collect(),
            exp: (now + Duration::hours(1)).timestamp(),
            iat: now.timestamp(),
            iss: TEST_ISSUER.to_string(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .expect("Failed to encode token")
    }

    /// Send a request and decode the JSON response (`Value::Null` when empty).
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::GET, path, token, None).await
    }

    pub async fn post(&self, path: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, path, token, Some(body)).await
    }
}
