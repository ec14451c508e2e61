//! Auth domain - token issuance and verification
//!
//! Responsibilities:
//! - Minting JWTs that carry a member's tenant and role claims
//! - Verifying bearer tokens for the HTTP middleware
//!
//! Deciding what a verified caller may do is not handled here; see
//! `common::auth`.

pub mod jwt;

pub use jwt::{Claims, JwtService};
