//! Attendance use-case service.
//!
//! # Responsibility
//! - Turn raw form submissions into persisted records.
//! - Expose list/get/delete to front ends without leaking SQL.
//!
//! # Invariants
//! - A rejected form never reaches the repository.
//! - Service layer remains storage-agnostic.

use crate::model::form::{AttendanceForm, FormError};
use crate::model::record::{AttendanceRecord, RecordId};
use crate::repo::record_repo::{AttendanceRepository, RepoError, RepoResult};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure of a form submission.
#[derive(Debug)]
pub enum SubmitError {
    /// The form was rejected before any storage write.
    Validation(FormError),
    Repo(RepoError),
}

impl Display for SubmitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SubmitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<FormError> for SubmitError {
    fn from(value: FormError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for SubmitError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Use-case service wrapper for attendance records.
pub struct AttendanceService<R: AttendanceRepository> {
    repo: R,
}

impl<R: AttendanceRepository> AttendanceService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates a raw form and persists it on success.
    ///
    /// # Contract
    /// - Returns the store-assigned id of the new record.
    /// - Returns `SubmitError::Validation` without touching storage when the
    ///   form breaks a rule.
    pub fn submit(&self, form: &AttendanceForm) -> Result<RecordId, SubmitError> {
        let record = match form.validate() {
            Ok(record) => record,
            Err(err) => {
                warn!(
                    "event=form_submit module=service status=rejected reason={}",
                    err.code()
                );
                return Err(err.into());
            }
        };

        let id = self.repo.create_record(&record)?;
        info!("event=form_submit module=service status=ok id={id}");
        Ok(id)
    }

    /// Lists every record in storage order.
    pub fn list(&self) -> RepoResult<Vec<AttendanceRecord>> {
        self.repo.list_records()
    }

    pub fn get(&self, id: RecordId) -> RepoResult<Option<AttendanceRecord>> {
        self.repo.get_record(id)
    }

    /// Deletes one record by id.
    ///
    /// Returns repository-level `NotFound` unchanged.
    pub fn delete(&self, id: RecordId) -> RepoResult<()> {
        self.repo.delete_record(id)
    }
}
