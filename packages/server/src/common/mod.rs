// Common types shared across the application

pub mod auth;
pub mod entity_ids;
pub mod id;

pub use auth::{authorize, AuthError, Caller, ConfigurationDefect, Decision, Role, RoleMatrix};
pub use entity_ids::*;
pub use id::Id;
