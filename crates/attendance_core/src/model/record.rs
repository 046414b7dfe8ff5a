//! Attendance record domain model.
//!
//! # Responsibility
//! - Define the persisted attendance entry and its pre-insert shape.
//!
//! # Invariants
//! - `id` is assigned by the store, unique, and never reused.
//! - `name` is trimmed, non-empty, letters and spaces only.
//! - `roll_no` is positive for records written through the form; rows
//!   adopted from a legacy table may carry `0` or values wider than `u32`.
//! - `subjects` is a non-empty subset of the catalog.

use crate::model::subject::SubjectSet;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Fixed date format accepted by the form and stored in `attendees.date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Store-assigned record identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(i64);

impl RecordId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated attendance entry that has not been persisted yet.
///
/// Only produced by [`crate::AttendanceForm::validate`], so repository
/// writes never see unchecked input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttendanceRecord {
    pub(crate) name: String,
    pub(crate) roll_no: u32,
    pub(crate) date: NaiveDate,
    pub(crate) subjects: SubjectSet,
}

impl NewAttendanceRecord {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn roll_no(&self) -> u32 {
        self.roll_no
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn subjects(&self) -> &SubjectSet {
        &self.subjects
    }
}

/// One persisted attendance entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: RecordId,
    pub name: String,
    /// Stored integer as read back; see the module invariants.
    pub roll_no: i64,
    /// Serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub subjects: SubjectSet,
}

impl AttendanceRecord {
    /// Date rendered in the fixed storage/display format.
    pub fn date_text(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}
