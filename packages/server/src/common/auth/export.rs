//! Frontend copy of the role matrix.
//!
//! The single-page app hides buttons and menu entries the user cannot use. It
//! gets the table from here rather than keeping its own, and it is only ever
//! advisory: the backend gate still decides every request.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::matrix::RoleMatrix;

/// Bumped whenever the artifact shape changes.
pub const EXPORT_VERSION: u32 = 1;

/// Serialized form of the matrix. Ordering is deterministic, so two exports
/// of the same table are byte-identical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixExport {
    pub version: u32,
    pub permissions: Vec<String>,
    pub roles: BTreeMap<String, Vec<String>>,
}

impl RoleMatrix {
    pub fn export(&self) -> MatrixExport {
        let permissions = self
            .catalog()
            .sorted()
            .into_iter()
            .map(str::to_string)
            .collect();

        let roles = self
            .roles()
            .iter()
            .map(|&role| {
                let mut granted: Vec<String> = self
                    .permissions_for_role(role)
                    .iter()
                    .map(|p| p.to_string())
                    .collect();
                granted.sort_unstable();
                (role.as_str().to_string(), granted)
            })
            .collect();

        MatrixExport {
            version: EXPORT_VERSION,
            permissions,
            roles,
        }
    }
}
