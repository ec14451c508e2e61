//! Tenant-scoped in-memory document store.
//!
//! Records are partitioned by `(tenant, kind)`. A lookup from another tenant
//! behaves exactly like a missing record.

use std::collections::{BTreeMap, HashMap};

use chrono::Utc;
use thiserror::Error;
use tokio::sync::RwLock;

use super::models::{Record, ResourceKind};
use crate::common::{MemberId, RecordId, TenantId};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{kind} record {id} not found")]
    NotFound { kind: &'static str, id: RecordId },

    #[error("record body must be a JSON object")]
    InvalidPayload,
}

type Partition = BTreeMap<RecordId, Record>;

#[derive(Default)]
pub struct RecordStore {
    partitions: RwLock<HashMap<(TenantId, ResourceKind), Partition>>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records of `kind` for a tenant, oldest first.
    pub async fn list(&self, tenant_id: TenantId, kind: ResourceKind) -> Vec<Record> {
        let partitions = self.partitions.read().await;
        partitions
            .get(&(tenant_id, kind))
            .map(|partition| partition.values().cloned().collect())
            .unwrap_or_default()
    }

    pub async fn get(
        &self,
        tenant_id: TenantId,
        kind: ResourceKind,
        id: RecordId,
    ) -> Result<Record, StoreError> {
        let partitions = self.partitions.read().await;
        partitions
            .get(&(tenant_id, kind))
            .and_then(|partition| partition.get(&id))
            .cloned()
            .ok_or(StoreError::NotFound {
                kind: kind.slug(),
                id,
            })
    }

    pub async fn insert(
        &self,
        tenant_id: TenantId,
        kind: ResourceKind,
        created_by: MemberId,
        data: serde_json::Value,
    ) -> Result<Record, StoreError> {
        if !data.is_object() {
            return Err(StoreError::InvalidPayload);
        }

        let now = Utc::now();
        let record = Record {
            id: RecordId::new(),
            tenant_id,
            kind,
            data,
            created_by,
            created_at: now,
            updated_at: now,
        };

        let mut partitions = self.partitions.write().await;
        partitions
            .entry((tenant_id, kind))
            .or_default()
            .insert(record.id, record.clone());
        Ok(record)
    }

    /// Replace a record's data, keeping its identity and creation metadata.
    pub async fn update(
        &self,
        tenant_id: TenantId,
        kind: ResourceKind,
        id: RecordId,
        data: serde_json::Value,
    ) -> Result<Record, StoreError> {
        if !data.is_object() {
            return Err(StoreError::InvalidPayload);
        }

        let mut partitions = self.partitions.write().await;
        let record = partitions
            .get_mut(&(tenant_id, kind))
            .and_then(|partition| partition.get_mut(&id))
            .ok_or(StoreError::NotFound {
                kind: kind.slug(),
                id,
            })?;

        record.data = data;
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    pub async fn delete(
        &self,
        tenant_id: TenantId,
        kind: ResourceKind,
        id: RecordId,
    ) -> Result<Record, StoreError> {
        let mut partitions = self.partitions.write().await;
        partitions
            .get_mut(&(tenant_id, kind))
            .and_then(|partition| partition.remove(&id))
            .ok_or(StoreError::NotFound {
                kind: kind.slug(),
                id,
            })
    }
}
