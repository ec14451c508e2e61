//! Authorization gate tests through the HTTP stack.
//!
//! Every protected route answers:
//! 1. 401 `unauthenticated` when no valid identity is presented
//! 2. 403 `forbidden` when the identity's roles lack the route's permission
//! 3. the handler's response otherwise

mod common;

use axum::http::{Method, StatusCode};
use clinic_core::common::auth::{permissions, PermissionCatalog};
use clinic_core::common::{Role, RoleMatrix};
use serde_json::json;

use crate::common::TestHarness;

// ============================================================================
// Reference scenarios
// ============================================================================

#[tokio::test]
async fn admin_can_read_patients() {
    let harness = TestHarness::new();
    let token = harness.token(&[Role::Admin]);

    let (status, body) = harness.get("/api/patients", Some(&token)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn patient_cannot_write_patients() {
    let harness = TestHarness::new();
    let token = harness.token(&[Role::Patient]);

    let (status, body) = harness
        .post("/api/patients", Some(&token), json!({"name": "Ada"}))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "forbidden");
    assert!(body["message"].as_str().unwrap().contains("patients.write"));
}

#[tokio::test]
async fn hr_manager_role_contributes_hr_write() {
    let harness = TestHarness::new();

    let doctor_only = harness.token(&[Role::Doctor]);
    let (status, _) = harness
        .post("/api/hr", Some(&doctor_only), json!({"shift": "night"}))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let doctor_and_hr = harness.token(&[Role::Doctor, Role::HrManager]);
    let (status, body) = harness
        .post("/api/hr", Some(&doctor_and_hr), json!({"shift": "night"}))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["shift"], "night");
}

#[tokio::test]
async fn no_roles_is_forbidden_but_no_identity_is_unauthenticated() {
    let harness = TestHarness::new();

    let roleless = harness.token(&[]);
    let (status, body) = harness.get("/api/notifications", Some(&roleless)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "forbidden");

    let (status, body) = harness.get("/api/notifications", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthenticated");
}

#[tokio::test]
async fn unknown_role_claim_grants_nothing() {
    let harness = TestHarness::new();
    let token = harness.raw_token(&["Guest"]);

    let (status, _) = harness.get("/api/appointments", Some(&token)).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn unknown_role_does_not_mask_a_known_one() {
    let harness = TestHarness::new();
    let token = harness.raw_token(&["Guest", "Receptionist"]);

    let (status, _) = harness.get("/api/appointments", Some(&token)).await;

    assert_eq!(status, StatusCode::OK);
}

// ============================================================================
// Gate behavior
// ============================================================================

#[tokio::test]
async fn invalid_token_is_unauthenticated() {
    let harness = TestHarness::new();

    let (status, _) = harness.get("/api/lab", Some("not-a-jwt")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_from_another_issuer_is_unauthenticated() {
    let harness = TestHarness::new();
    let foreign = clinic_core::domains::auth::JwtService::new(
        common::TEST_SECRET,
        "someone-else".to_string(),
    );
    let token = foreign
        .create_token(uuid::Uuid::new_v4(), harness.tenant_id, &[Role::Admin])
        .unwrap();

    let (status, _) = harness.get("/api/lab", Some(&token)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn gate_runs_before_the_handler() {
    let harness = TestHarness::new();
    let missing = "/api/patients/0190f6a1-7e4c-7000-8000-000000000000";

    // A missing record would be 404, but the gate answers first.
    let patient = harness.token(&[Role::Patient]);
    let (status, _) = harness
        .request(Method::DELETE, missing, Some(&patient), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = harness.request(Method::DELETE, missing, None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let receptionist = harness.token(&[Role::Receptionist]);
    let (status, body) = harness
        .request(Method::DELETE, missing, Some(&receptionist), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[tokio::test]
async fn read_and_write_are_gated_separately() {
    let harness = TestHarness::new();
    let pharmacist = harness.token(&[Role::Pharmacist]);

    let (status, _) = harness.get("/api/billing", Some(&pharmacist)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = harness
        .post("/api/billing", Some(&pharmacist), json!({"total": 12}))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn every_role_matches_the_matrix_on_every_collection() {
    let harness = TestHarness::new();
    let matrix = RoleMatrix::clinic().unwrap();

    for role in Role::ALL {
        let token = harness.token(&[role]);
        for kind in clinic_core::domains::records::ResourceKind::ALL {
            let path = format!("/api/{}", kind.slug());
            let (status, _) = harness.get(&path, Some(&token)).await;

            let expected = if matrix.has_permission(role.as_str(), kind.read_permission()) {
                StatusCode::OK
            } else {
                StatusCode::FORBIDDEN
            };
            assert_eq!(status, expected, "{role} GET {path}");
        }
    }
}

#[tokio::test]
async fn substitute_matrix_changes_decisions() {
    let catalog = PermissionCatalog::clinic().unwrap();
    let matrix = RoleMatrix::builder(catalog)
        .grant("Patient", &[permissions::PATIENTS_WRITE])
        .build()
        .unwrap();
    let harness = TestHarness::with_matrix(matrix);

    let patient = harness.token(&[Role::Patient]);
    let (status, _) = harness
        .post("/api/patients", Some(&patient), json!({"name": "Ada"}))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    // Nothing else was granted, not even to Admin.
    let admin = harness.token(&[Role::Admin]);
    let (status, _) = harness.get("/api/patients", Some(&admin)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

// ============================================================================
// Public and self-service endpoints
// ============================================================================

#[tokio::test]
async fn health_is_public() {
    let harness = TestHarness::new();

    let (status, body) = harness.get("/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["roles"], Role::ALL.len());
}

#[tokio::test]
async fn matrix_export_is_public() {
    let harness = TestHarness::new();

    let (status, body) = harness.get("/api/permissions/matrix", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["version"], 1);
    let hr_manager = body["roles"]["HRManager"].as_array().unwrap();
    assert!(hr_manager.contains(&json!("hr.write")));
    let patient = body["roles"]["Patient"].as_array().unwrap();
    assert!(!patient.contains(&json!("patients.write")));
}

#[tokio::test]
async fn my_permissions_requires_identity() {
    let harness = TestHarness::new();

    let (status, body) = harness.get("/api/me/permissions", None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthenticated");
}

#[tokio::test]
async fn my_permissions_is_the_union_of_roles() {
    let harness = TestHarness::new();
    let token = harness.raw_token(&["Doctor", "HRManager", "Guest"]);

    let (status, body) = harness.get("/api/me/permissions", Some(&token)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["roles"], json!(["Doctor", "HRManager", "Guest"]));
    let granted = body["permissions"].as_array().unwrap();
    assert!(granted.contains(&json!("hr.write")));
    assert!(granted.contains(&json!("patients.write")));
    assert!(!granted.contains(&json!("billing.write")));
}
