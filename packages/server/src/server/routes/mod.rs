// HTTP routes
pub mod health;
pub mod permissions;
pub mod protected;
pub mod records;

pub use health::*;
pub use permissions::*;
pub use protected::{route_defects, validate_routes, ProtectedRouter, RouteRequirement};
pub use records::resource_routes;
