//! Command handlers behind the `attendance` subcommands.
//!
//! # Responsibility
//! - Map form submission, list view and confirmed delete onto the service.
//! - Surface validation failures as user messages rather than errors.
//!
//! # Invariants
//! - Handlers never touch SQL directly; everything goes through the service.
//! - Storage faults propagate as `Err` and end the command.

use crate::view::{confirm, render_table};
use anyhow::Result;
use attendance_core::{
    catalog_labels, AttendanceForm, AttendanceRepository, AttendanceService, RecordId, RepoError,
    SubmitError,
};
use log::{info, warn};
use std::io::{BufRead, Write};
use std::process::ExitCode;

const DELETE_PROMPT: &str = "Are you sure you want to delete this attendee?";

/// User-visible result of one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// The form broke a validation rule; nothing was stored.
    Rejected,
    NotFound,
    Cancelled,
}

impl Outcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Self::Success | Self::Cancelled => ExitCode::SUCCESS,
            Self::NotFound => ExitCode::from(1),
            Self::Rejected => ExitCode::from(2),
        }
    }
}

/// Submits one attendance form.
pub fn add<R: AttendanceRepository>(
    service: &AttendanceService<R>,
    form: &AttendanceForm,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<Outcome> {
    match service.submit(form) {
        Ok(id) => {
            writeln!(out, "Attendee added successfully! (id={id})")?;
            Ok(Outcome::Success)
        }
        Err(SubmitError::Validation(reason)) => {
            writeln!(err, "Input Error: {reason}")?;
            Ok(Outcome::Rejected)
        }
        Err(SubmitError::Repo(repo_err)) => Err(repo_err.into()),
    }
}

/// Prints every record as a table, or as a JSON array.
pub fn list<R: AttendanceRepository>(
    service: &AttendanceService<R>,
    json: bool,
    out: &mut impl Write,
) -> Result<Outcome> {
    let records = service.list()?;
    info!(
        "event=list_view module=cli status=ok count={} json={}",
        records.len(),
        json
    );

    if json {
        serde_json::to_writer_pretty(&mut *out, &records)?;
        writeln!(out)?;
    } else if records.is_empty() {
        writeln!(out, "No attendees recorded.")?;
    } else {
        write!(out, "{}", render_table(&records))?;
    }
    Ok(Outcome::Success)
}

/// Deletes one record after showing it and asking for confirmation.
///
/// `assume_yes` skips the prompt. A row that exists but cannot be decoded is
/// announced by id only and can still be deleted.
pub fn delete<R: AttendanceRepository>(
    service: &AttendanceService<R>,
    id: RecordId,
    assume_yes: bool,
    input: &mut impl BufRead,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<Outcome> {
    match service.get(id) {
        Ok(Some(record)) => write!(out, "{}", render_table(std::slice::from_ref(&record)))?,
        Ok(None) => {
            writeln!(err, "Error: no attendee with id {id}")?;
            return Ok(Outcome::NotFound);
        }
        // An unreadable row must still be removable; confirm by id alone.
        Err(RepoError::InvalidData(message)) => {
            warn!("event=delete_preview module=cli status=unreadable id={id}");
            writeln!(err, "Warning: attendee {id} cannot be displayed ({message})")?;
        }
        Err(repo_err) => return Err(repo_err.into()),
    }

    if !assume_yes && !confirm(DELETE_PROMPT, input, out)? {
        writeln!(out, "Deletion cancelled.")?;
        return Ok(Outcome::Cancelled);
    }

    match service.delete(id) {
        Ok(()) => {
            writeln!(out, "Attendee deleted successfully!")?;
            Ok(Outcome::Success)
        }
        Err(RepoError::NotFound(_)) => {
            writeln!(err, "Error: no attendee with id {id}")?;
            Ok(Outcome::NotFound)
        }
        Err(repo_err) => Err(repo_err.into()),
    }
}

/// Prints the subject catalog, one label per line.
pub fn subjects(out: &mut impl Write) -> Result<Outcome> {
    for label in catalog_labels() {
        writeln!(out, "{label}")?;
    }
    Ok(Outcome::Success)
}
