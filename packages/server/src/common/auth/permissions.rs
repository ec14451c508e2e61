//! Permission catalog for the clinic API.
//!
//! Every capability the API recognizes is a `module.action` string declared
//! here as a constant. Route declarations and role grants reference these
//! constants; a permission that is not listed in [`ALL_PERMISSIONS`] does not
//! exist as far as authorization is concerned.
//!
//! ```rust
//! use clinic_core::common::auth::{permissions, PermissionCatalog};
//!
//! let catalog = PermissionCatalog::clinic().unwrap();
//! assert!(catalog.contains(permissions::PATIENTS_READ));
//! assert!(!catalog.contains("appointment.read"));
//! ```

use std::collections::{BTreeSet, HashSet};

use super::errors::ConfigurationDefect;

// =============================================================================
// Patients
// =============================================================================

/// View patient demographics and charts
pub const PATIENTS_READ: &str = "patients.read";
/// Register or update patients
pub const PATIENTS_WRITE: &str = "patients.write";

// =============================================================================
// Appointments
// =============================================================================

pub const APPOINTMENTS_READ: &str = "appointments.read";
pub const APPOINTMENTS_WRITE: &str = "appointments.write";

// =============================================================================
// Waiting-room queue
// =============================================================================

pub const QUEUE_READ: &str = "queue.read";
pub const QUEUE_WRITE: &str = "queue.write";

// =============================================================================
// Billing
// =============================================================================

/// View invoices and payments
pub const BILLING_READ: &str = "billing.read";
/// Issue invoices and record payments
pub const BILLING_WRITE: &str = "billing.write";

// =============================================================================
// Lab
// =============================================================================

pub const LAB_READ: &str = "lab.read";
pub const LAB_WRITE: &str = "lab.write";

// =============================================================================
// Pharmacy
// =============================================================================

pub const PHARMACY_READ: &str = "pharmacy.read";
pub const PHARMACY_WRITE: &str = "pharmacy.write";

// =============================================================================
// HR
// =============================================================================

/// View staff profiles, shifts and leave
pub const HR_READ: &str = "hr.read";
/// Manage staff profiles, shifts and leave
pub const HR_WRITE: &str = "hr.write";

// =============================================================================
// Messaging and notifications
// =============================================================================

pub const MESSAGES_READ: &str = "messages.read";
pub const MESSAGES_WRITE: &str = "messages.write";
pub const NOTIFICATIONS_READ: &str = "notifications.read";
/// Broadcast notifications to other users
pub const NOTIFICATIONS_WRITE: &str = "notifications.write";

// =============================================================================
// Free-form clinical records (document store)
// =============================================================================

pub const RECORDS_READ: &str = "records.read";
pub const RECORDS_WRITE: &str = "records.write";

// =============================================================================
// User accounts
// =============================================================================

pub const USERS_READ: &str = "users.read";
pub const USERS_WRITE: &str = "users.write";

/// The complete catalog, in declaration order.
pub const ALL_PERMISSIONS: &[&str] = &[
    PATIENTS_READ,
    PATIENTS_WRITE,
    APPOINTMENTS_READ,
    APPOINTMENTS_WRITE,
    QUEUE_READ,
    QUEUE_WRITE,
    BILLING_READ,
    BILLING_WRITE,
    LAB_READ,
    LAB_WRITE,
    PHARMACY_READ,
    PHARMACY_WRITE,
    HR_READ,
    HR_WRITE,
    MESSAGES_READ,
    MESSAGES_WRITE,
    NOTIFICATIONS_READ,
    NOTIFICATIONS_WRITE,
    RECORDS_READ,
    RECORDS_WRITE,
    USERS_READ,
    USERS_WRITE,
];

/// The set of permissions the process recognizes.
///
/// Built once at startup and never mutated. Lookups hand back the catalog's
/// own `&'static str`, so grants and route requirements can be compared by
/// value without allocating.
#[derive(Debug, Clone)]
pub struct PermissionCatalog {
    permissions: HashSet<&'static str>,
}

impl PermissionCatalog {
    /// The clinic's production catalog.
    pub fn clinic() -> Result<Self, ConfigurationDefect> {
        Self::from_permissions(ALL_PERMISSIONS)
    }

    /// Build a catalog from an explicit list.
    ///
    /// Fails on the first malformed or duplicated entry.
    pub fn from_permissions(permissions: &[&'static str]) -> Result<Self, ConfigurationDefect> {
        let mut set = HashSet::with_capacity(permissions.len());
        for &permission in permissions {
            validate_format(permission)?;
            if !set.insert(permission) {
                return Err(ConfigurationDefect::DuplicatePermission(
                    permission.to_string(),
                ));
            }
        }
        Ok(Self { permissions: set })
    }

    /// Every permission string the system recognizes.
    pub fn all_permissions(&self) -> &HashSet<&'static str> {
        &self.permissions
    }

    pub fn contains(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }

    /// Resolve a permission string to the catalog's canonical entry.
    pub fn lookup(&self, permission: &str) -> Option<&'static str> {
        self.permissions.get(permission).copied()
    }

    /// Module names (the part before the dot), sorted.
    pub fn modules(&self) -> BTreeSet<&'static str> {
        self.permissions
            .iter()
            .filter_map(|p| p.split_once('.').map(|(module, _)| module))
            .collect()
    }

    /// All permissions, sorted.
    pub fn sorted(&self) -> Vec<&'static str> {
        let mut permissions: Vec<_> = self.permissions.iter().copied().collect();
        permissions.sort_unstable();
        permissions
    }

    pub fn len(&self) -> usize {
        self.permissions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }
}

/// Check that a permission has the `module.action` shape.
///
/// Both segments must be non-empty and made of lowercase ASCII letters or
/// underscores, with exactly one dot between them.
pub fn validate_format(permission: &str) -> Result<(), ConfigurationDefect> {
    let valid_segment = |s: &str| {
        !s.is_empty() && s.chars().all(|c| c.is_ascii_lowercase() || c == '_')
    };

    match permission.split_once('.') {
        Some((module, action)) if valid_segment(module) && valid_segment(action) => Ok(()),
        _ => Err(ConfigurationDefect::MalformedPermission(
            permission.to_string(),
        )),
    }
}
