// HTTP middleware
pub mod jwt_auth;
pub mod require_permission;

pub use jwt_auth::*;
pub use require_permission::*;
