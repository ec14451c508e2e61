use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::auth::permissions;
use crate::common::{MemberId, RecordId, TenantId};

/// Resource collections exposed by the API.
///
/// Each kind maps to one pair of catalog permissions; the mapping is fixed
/// here so route declarations never compute a permission from request data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Patients,
    Appointments,
    Queue,
    Billing,
    Lab,
    Pharmacy,
    Hr,
    Messages,
    Notifications,
    Records,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 10] = [
        ResourceKind::Patients,
        ResourceKind::Appointments,
        ResourceKind::Queue,
        ResourceKind::Billing,
        ResourceKind::Lab,
        ResourceKind::Pharmacy,
        ResourceKind::Hr,
        ResourceKind::Messages,
        ResourceKind::Notifications,
        ResourceKind::Records,
    ];

    /// URL segment under `/api`
    pub fn slug(&self) -> &'static str {
        match self {
            ResourceKind::Patients => "patients",
            ResourceKind::Appointments => "appointments",
            ResourceKind::Queue => "queue",
            ResourceKind::Billing => "billing",
            ResourceKind::Lab => "lab",
            ResourceKind::Pharmacy => "pharmacy",
            ResourceKind::Hr => "hr",
            ResourceKind::Messages => "messages",
            ResourceKind::Notifications => "notifications",
            ResourceKind::Records => "records",
        }
    }

    pub fn read_permission(&self) -> &'static str {
        match self {
            ResourceKind::Patients => permissions::PATIENTS_READ,
            ResourceKind::Appointments => permissions::APPOINTMENTS_READ,
            ResourceKind::Queue => permissions::QUEUE_READ,
            ResourceKind::Billing => permissions::BILLING_READ,
            ResourceKind::Lab => permissions::LAB_READ,
            ResourceKind::Pharmacy => permissions::PHARMACY_READ,
            ResourceKind::Hr => permissions::HR_READ,
            ResourceKind::Messages => permissions::MESSAGES_READ,
            ResourceKind::Notifications => permissions::NOTIFICATIONS_READ,
            ResourceKind::Records => permissions::RECORDS_READ,
        }
    }

    pub fn write_permission(&self) -> &'static str {
        match self {
            ResourceKind::Patients => permissions::PATIENTS_WRITE,
            ResourceKind::Appointments => permissions::APPOINTMENTS_WRITE,
            ResourceKind::Queue => permissions::QUEUE_WRITE,
            ResourceKind::Billing => permissions::BILLING_WRITE,
            ResourceKind::Lab => permissions::LAB_WRITE,
            ResourceKind::Pharmacy => permissions::PHARMACY_WRITE,
            ResourceKind::Hr => permissions::HR_WRITE,
            ResourceKind::Messages => permissions::MESSAGES_WRITE,
            ResourceKind::Notifications => permissions::NOTIFICATIONS_WRITE,
            ResourceKind::Records => permissions::RECORDS_WRITE,
        }
    }
}

/// A stored document. `data` is free-form JSON owned by the frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub tenant_id: TenantId,
    pub kind: ResourceKind,
    pub data: serde_json::Value,
    pub created_by: MemberId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
