//! Typed ID definitions for clinic entities.

pub use super::id::Id;

/// Marker type for Member entities (staff and patient accounts).
pub struct Member;

/// Marker type for Tenant entities (one per clinic).
pub struct Tenant;

/// Marker type for stored clinic records.
pub struct Record;

pub type MemberId = Id<Member>;

pub type TenantId = Id<Tenant>;

pub type RecordId = Id<Record>;
