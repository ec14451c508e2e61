// Clinic API - Core
//
// Role-based access control for the clinic management REST API. The
// permission catalog and role matrix live in `common::auth`; the axum app in
// `server` enforces them once per request, before any handler runs.

pub mod common;
pub mod config;
pub mod domains;
pub mod server;

pub use config::*;
