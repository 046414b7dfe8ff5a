//! Attendance domain model.
//!
//! # Responsibility
//! - Define the persisted record shape, the subject catalog and raw form input.
//! - Own the validation rules a record must pass before persistence.
//!
//! # Invariants
//! - Records are identified by a store-assigned, never reused `RecordId`.
//! - Deletion is a hard delete; there is no tombstone state.

pub mod form;
pub mod record;
pub mod subject;
