use thiserror::Error;

/// Per-request authorization failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Permission denied: {permission}")]
    Unauthorized { permission: String },

    #[error("Invalid or expired token")]
    InvalidToken,
}

/// Inconsistencies in the static authorization tables.
///
/// These are deployment bugs. They are reported by startup validation and the
/// `clinic_cli check` command, never at request time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationDefect {
    #[error("permission `{0}` is not of the form module.action")]
    MalformedPermission(String),

    #[error("permission `{0}` is declared more than once in the catalog")]
    DuplicatePermission(String),

    #[error("role `{0}` is not a recognized role")]
    UnknownRole(String),

    #[error("role `{role}` is granted `{permission}`, which is not in the catalog")]
    UnknownGrant { role: String, permission: String },

    #[error("route {method} {path} requires `{permission}`, which is not in the catalog")]
    UnknownRouteRequirement {
        method: String,
        path: String,
        permission: String,
    },
}
