//! Records domain - free-form clinic documents
//!
//! Patients, appointments, queue tickets, invoices, lab orders, prescriptions,
//! staff files, messages, notifications and clinical notes are all stored as
//! tenant-scoped JSON documents. Access is decided by the route gate before a
//! handler touches the store.

pub mod models;
pub mod store;

pub use models::{Record, ResourceKind};
pub use store::{RecordStore, StoreError};
