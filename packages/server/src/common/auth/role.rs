use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Staff and patient roles recognized by the clinic.
///
/// The set is closed. Wire names are the exact claim strings carried in
/// tokens, and parsing is case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Doctor,
    Patient,
    Receptionist,
    LabTechnician,
    Pharmacist,
    #[serde(rename = "HRManager")]
    HrManager,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl Role {
    pub const ALL: [Role; 7] = [
        Role::Admin,
        Role::Doctor,
        Role::Patient,
        Role::Receptionist,
        Role::LabTechnician,
        Role::Pharmacist,
        Role::HrManager,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Doctor => "Doctor",
            Role::Patient => "Patient",
            Role::Receptionist => "Receptionist",
            Role::LabTechnician => "LabTechnician",
            Role::Pharmacist => "Pharmacist",
            Role::HrManager => "HRManager",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}
