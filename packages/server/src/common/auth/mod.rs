//! Authorization core for the clinic API
//!
//! Data flows one way: permission catalog → role matrix → gate. The matrix is
//! built once at startup and passed around behind an `Arc`:
//!
//! ```rust
//! use clinic_core::common::auth::{authorize, permissions, Decision, RoleMatrix};
//!
//! let matrix = RoleMatrix::clinic().unwrap();
//! assert_eq!(
//!     authorize(&matrix, None, permissions::PATIENTS_READ),
//!     Decision::Unauthenticated
//! );
//! ```

mod errors;
mod export;
mod gate;
mod matrix;
pub mod permissions;
mod role;

pub use errors::{AuthError, ConfigurationDefect};
pub use export::{MatrixExport, EXPORT_VERSION};
pub use gate::{authorize, Caller, Decision};
pub use matrix::{RoleMatrix, RoleMatrixBuilder};
pub use permissions::PermissionCatalog;
pub use role::{Role, UnknownRole};
