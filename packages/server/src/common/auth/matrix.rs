//! Role → permission matrix.
//!
//! The matrix is an immutable value: it is built once through
//! [`RoleMatrixBuilder`], validated against a [`PermissionCatalog`], then
//! shared behind an `Arc` with everything that makes authorization decisions.
//! Reads need no locking.
//!
//! Role arguments are claim strings. A string that does not name a [`Role`]
//! resolves to the empty permission set, so an unknown role can never grant
//! anything.

use std::collections::{BTreeSet, HashMap, HashSet};

use super::errors::ConfigurationDefect;
use super::permissions::{validate_format, PermissionCatalog};
use super::role::Role;

#[derive(Debug, Clone)]
pub struct RoleMatrix {
    catalog: PermissionCatalog,
    grants: HashMap<Role, HashSet<&'static str>>,
    empty: HashSet<&'static str>,
}

impl RoleMatrix {
    pub fn builder(catalog: PermissionCatalog) -> RoleMatrixBuilder {
        RoleMatrixBuilder {
            catalog,
            grants: HashMap::new(),
            defects: Vec::new(),
        }
    }

    /// The clinic's production table.
    pub fn clinic() -> Result<Self, ConfigurationDefect> {
        use super::permissions::*;

        Self::builder(PermissionCatalog::clinic()?)
            .grant_all("Admin")
            .grant(
                "Doctor",
                &[
                    PATIENTS_READ,
                    PATIENTS_WRITE,
                    APPOINTMENTS_READ,
                    APPOINTMENTS_WRITE,
                    QUEUE_READ,
                    LAB_READ,
                    LAB_WRITE,
                    PHARMACY_READ,
                    RECORDS_READ,
                    RECORDS_WRITE,
                    HR_READ,
                    MESSAGES_READ,
                    MESSAGES_WRITE,
                    NOTIFICATIONS_READ,
                ],
            )
            .grant(
                "Patient",
                &[
                    PATIENTS_READ,
                    APPOINTMENTS_READ,
                    APPOINTMENTS_WRITE,
                    BILLING_READ,
                    LAB_READ,
                    MESSAGES_READ,
                    MESSAGES_WRITE,
                    NOTIFICATIONS_READ,
                ],
            )
            .grant(
                "Receptionist",
                &[
                    PATIENTS_READ,
                    PATIENTS_WRITE,
                    APPOINTMENTS_READ,
                    APPOINTMENTS_WRITE,
                    QUEUE_READ,
                    QUEUE_WRITE,
                    BILLING_READ,
                    BILLING_WRITE,
                    MESSAGES_READ,
                    MESSAGES_WRITE,
                    NOTIFICATIONS_READ,
                    NOTIFICATIONS_WRITE,
                ],
            )
            .grant(
                "LabTechnician",
                &[
                    PATIENTS_READ,
                    LAB_READ,
                    LAB_WRITE,
                    MESSAGES_READ,
                    MESSAGES_WRITE,
                    NOTIFICATIONS_READ,
                ],
            )
            .grant(
                "Pharmacist",
                &[
                    PATIENTS_READ,
                    PHARMACY_READ,
                    PHARMACY_WRITE,
                    BILLING_READ,
                    MESSAGES_READ,
                    MESSAGES_WRITE,
                    NOTIFICATIONS_READ,
                ],
            )
            .grant(
                "HRManager",
                &[
                    HR_READ,
                    HR_WRITE,
                    USERS_READ,
                    USERS_WRITE,
                    MESSAGES_READ,
                    MESSAGES_WRITE,
                    NOTIFICATIONS_READ,
                ],
            )
            .build()
    }

    pub fn catalog(&self) -> &PermissionCatalog {
        &self.catalog
    }

    /// Roles the matrix answers for, in declaration order.
    pub fn roles(&self) -> &'static [Role] {
        &Role::ALL
    }

    /// Permission set for a role claim; empty for an unrecognized role.
    pub fn permissions_for(&self, role: &str) -> &HashSet<&'static str> {
        match role.parse::<Role>() {
            Ok(role) => self.permissions_for_role(role),
            Err(_) => &self.empty,
        }
    }

    pub fn permissions_for_role(&self, role: Role) -> &HashSet<&'static str> {
        self.grants.get(&role).unwrap_or(&self.empty)
    }

    pub fn has_permission(&self, role: &str, permission: &str) -> bool {
        self.permissions_for(role).contains(permission)
    }

    /// True iff at least one of `roles` grants `permission`.
    pub fn has_any_permission<S: AsRef<str>>(&self, roles: &[S], permission: &str) -> bool {
        roles
            .iter()
            .any(|role| self.has_permission(role.as_ref(), permission))
    }

    /// Union of the permission sets of every role held, sorted.
    pub fn effective_permissions<S: AsRef<str>>(&self, roles: &[S]) -> BTreeSet<&'static str> {
        roles
            .iter()
            .flat_map(|role| self.permissions_for(role.as_ref()).iter().copied())
            .collect()
    }
}

/// Collects grants and reports every inconsistency at [`build`](Self::build).
pub struct RoleMatrixBuilder {
    catalog: PermissionCatalog,
    grants: HashMap<Role, HashSet<&'static str>>,
    defects: Vec<ConfigurationDefect>,
}

impl RoleMatrixBuilder {
    pub fn grant(mut self, role: &str, permissions: &[&str]) -> Self {
        let Ok(parsed) = role.parse::<Role>() else {
            self.defects
                .push(ConfigurationDefect::UnknownRole(role.to_string()));
            return self;
        };

        for &permission in permissions {
            if let Err(defect) = validate_format(permission) {
                self.defects.push(defect);
                continue;
            }

            match self.catalog.lookup(permission) {
                Some(canonical) => {
                    self.grants.entry(parsed).or_default().insert(canonical);
                }
                None => self.defects.push(ConfigurationDefect::UnknownGrant {
                    role: role.to_string(),
                    permission: permission.to_string(),
                }),
            }
        }
        self
    }

    /// Grant every permission in the catalog.
    pub fn grant_all(self, role: &str) -> Self {
        let everything = self.catalog.sorted();
        self.grant(role, &everything)
    }

    /// Defects collected so far, in the order they were found.
    pub fn defects(&self) -> &[ConfigurationDefect] {
        &self.defects
    }

    /// Finish the matrix, failing with the first defect found.
    pub fn build(self) -> Result<RoleMatrix, ConfigurationDefect> {
        if let Some(defect) = self.defects.into_iter().next() {
            return Err(defect);
        }

        Ok(RoleMatrix {
            catalog: self.catalog,
            grants: self.grants,
            empty: HashSet::new(),
        })
    }
}
