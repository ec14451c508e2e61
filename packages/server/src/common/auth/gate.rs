//! Per-request authorization decision.
//!
//! A request is evaluated exactly once against the permission its route
//! declares. The decision is terminal: there is no retry and no partial grant.

use crate::common::entity_ids::{MemberId, TenantId};

use super::errors::AuthError;
use super::matrix::RoleMatrix;

/// Identity attached to a request by the authentication layer.
///
/// Role claims are kept verbatim; unrecognized claims are carried along and
/// simply grant nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Caller {
    pub member_id: MemberId,
    pub tenant_id: TenantId,
    pub roles: Vec<String>,
}

impl Caller {
    pub fn new(member_id: MemberId, tenant_id: TenantId, roles: Vec<String>) -> Self {
        Self {
            member_id,
            tenant_id,
            roles,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Granted,
    /// No identity was presented
    Unauthenticated,
    /// Identity present, but none of its roles grants the permission
    Unauthorized,
}

impl Decision {
    pub fn is_granted(&self) -> bool {
        matches!(self, Decision::Granted)
    }

    pub fn into_result(self, permission: &str) -> Result<(), AuthError> {
        match self {
            Decision::Granted => Ok(()),
            Decision::Unauthenticated => Err(AuthError::Unauthenticated),
            Decision::Unauthorized => Err(AuthError::Unauthorized {
                permission: permission.to_string(),
            }),
        }
    }
}

/// Decide whether `caller` may exercise `permission`.
///
/// Pure and synchronous: hash-set lookups only, no I/O.
pub fn authorize(matrix: &RoleMatrix, caller: Option<&Caller>, permission: &str) -> Decision {
    let Some(caller) = caller else {
        return Decision::Unauthenticated;
    };

    if matrix.has_any_permission(&caller.roles, permission) {
        Decision::Granted
    } else {
        Decision::Unauthorized
    }
}
