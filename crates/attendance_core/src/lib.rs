//! Core domain logic for the attendance tracker.
//! This crate is the single source of truth for record invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::form::{AttendanceForm, FormError, FormField};
pub use model::record::{AttendanceRecord, NewAttendanceRecord, RecordId, DATE_FORMAT};
pub use model::subject::{catalog_labels, parse_subject, Subject, SubjectError, SubjectSet};
pub use repo::record_repo::{
    AttendanceRepository, RepoError, RepoResult, SqliteAttendanceRepository,
};
pub use service::attendance_service::{AttendanceService, SubmitError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
