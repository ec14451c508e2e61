//! CRUD handlers for tenant-scoped clinic records.
//!
//! Handlers run only after the route gate granted the request, so the
//! `Caller` extension is always present here.

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use tracing::info;

use crate::common::{Caller, RecordId};
use crate::domains::records::{Record, ResourceKind};
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::server::routes::protected::ProtectedRouter;

/// Register the five record routes for one resource kind.
pub fn resource_routes(routes: ProtectedRouter, kind: ResourceKind) -> ProtectedRouter {
    let collection = format!("/api/{}", kind.slug());
    let item = format!("{collection}/:id");

    routes
        .get(
            &collection,
            kind.read_permission(),
            move |state: Extension<AppState>, caller: Extension<Caller>| {
                list_records(kind, state, caller)
            },
        )
        .post(
            &collection,
            kind.write_permission(),
            move |state: Extension<AppState>, caller: Extension<Caller>, body: Json<Value>| {
                create_record(kind, state, caller, body)
            },
        )
        .get(
            &item,
            kind.read_permission(),
            move |state: Extension<AppState>, caller: Extension<Caller>, id: Path<RecordId>| {
                get_record(kind, state, caller, id)
            },
        )
        .put(
            &item,
            kind.write_permission(),
            move |state: Extension<AppState>,
                  caller: Extension<Caller>,
                  id: Path<RecordId>,
                  body: Json<Value>| { update_record(kind, state, caller, id, body) },
        )
        .delete(
            &item,
            kind.write_permission(),
            move |state: Extension<AppState>, caller: Extension<Caller>, id: Path<RecordId>| {
                delete_record(kind, state, caller, id)
            },
        )
}

pub async fn list_records(
    kind: ResourceKind,
    Extension(state): Extension<AppState>,
    Extension(caller): Extension<Caller>,
) -> Json<Vec<Record>> {
    Json(state.store.list(caller.tenant_id, kind).await)
}

pub async fn get_record(
    kind: ResourceKind,
    Extension(state): Extension<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<RecordId>,
) -> Result<Json<Record>, ApiError> {
    let record = state.store.get(caller.tenant_id, kind, id).await?;
    Ok(Json(record))
}

pub async fn create_record(
    kind: ResourceKind,
    Extension(state): Extension<AppState>,
    Extension(caller): Extension<Caller>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Record>), ApiError> {
    let record = state
        .store
        .insert(caller.tenant_id, kind, caller.member_id, body)
        .await?;

    info!(
        kind = kind.slug(),
        record_id = %record.id,
        member_id = %caller.member_id,
        "Record created"
    );
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update_record(
    kind: ResourceKind,
    Extension(state): Extension<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<RecordId>,
    Json(body): Json<Value>,
) -> Result<Json<Record>, ApiError> {
    let record = state.store.update(caller.tenant_id, kind, id, body).await?;
    Ok(Json(record))
}

pub async fn delete_record(
    kind: ResourceKind,
    Extension(state): Extension<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<RecordId>,
) -> Result<StatusCode, ApiError> {
    state.store.delete(caller.tenant_id, kind, id).await?;

    info!(
        kind = kind.slug(),
        record_id = %id,
        member_id = %caller.member_id,
        "Record deleted"
    );
    Ok(StatusCode::NO_CONTENT)
}
