//! Attendance record repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide insert, list-all, get and delete over the `attendees` table.
//! - Keep SQL and column encoding details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths only accept validated `NewAttendanceRecord` values.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Read paths accept any non-negative stored roll, so rows adopted from a
//!   legacy table stay listable.
//! - `list_records` returns rows in ascending id (insertion) order.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::record::{AttendanceRecord, NewAttendanceRecord, RecordId, DATE_FORMAT};
use crate::model::subject::SubjectSet;
use chrono::NaiveDate;
use log::{info, warn};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const RECORD_SELECT_SQL: &str = "SELECT
    id,
    name,
    roll_no,
    date,
    subjects
FROM attendees";

const REQUIRED_COLUMNS: &[&str] = &["id", "name", "roll_no", "date", "subjects"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for attendance persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(RecordId),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "no attendee with id {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted attendee data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it with `open_db`"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for attendance records.
///
/// There is deliberately no update operation.
pub trait AttendanceRepository {
    /// Persists a record and returns the store-assigned id.
    fn create_record(&self, record: &NewAttendanceRecord) -> RepoResult<RecordId>;
    /// Returns all records in storage order.
    fn list_records(&self) -> RepoResult<Vec<AttendanceRecord>>;
    fn get_record(&self, id: RecordId) -> RepoResult<Option<AttendanceRecord>>;
    /// Removes one record. Returns `NotFound` and changes nothing when absent.
    fn delete_record(&self, id: RecordId) -> RepoResult<()>;
}

/// SQLite-backed attendance repository borrowing an open connection.
pub struct SqliteAttendanceRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAttendanceRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `user_version` is not the latest.
    /// - `MissingRequiredTable`/`MissingRequiredColumn` on schema drift.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl AttendanceRepository for SqliteAttendanceRepository<'_> {
    fn create_record(&self, record: &NewAttendanceRecord) -> RepoResult<RecordId> {
        self.conn.execute(
            "INSERT INTO attendees (
                name,
                roll_no,
                date,
                subjects
            ) VALUES (?1, ?2, ?3, ?4);",
            params![
                record.name(),
                i64::from(record.roll_no()),
                record.date().format(DATE_FORMAT).to_string(),
                record.subjects().to_column_value(),
            ],
        )?;

        let id = RecordId::new(self.conn.last_insert_rowid());
        info!(
            "event=record_create module=repo status=ok id={} subject_count={}",
            id,
            record.subjects().len()
        );
        Ok(id)
    }

    fn list_records(&self) -> RepoResult<Vec<AttendanceRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{RECORD_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            records.push(parse_record_row(row)?);
        }

        Ok(records)
    }

    fn get_record(&self, id: RecordId) -> RepoResult<Option<AttendanceRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{RECORD_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.get()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_record_row(row)?));
        }

        Ok(None)
    }

    fn delete_record(&self, id: RecordId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM attendees WHERE id = ?1;", [id.get()])?;

        if changed == 0 {
            warn!("event=record_delete module=repo status=not_found id={id}");
            return Err(RepoError::NotFound(id));
        }

        info!("event=record_delete module=repo status=ok id={id}");
        Ok(())
    }
}

struct RawRecordRow {
    id: i64,
    name: String,
    roll_no: i64,
    date: String,
    subjects: String,
}

impl RawRecordRow {
    fn into_record(self) -> RepoResult<AttendanceRecord> {
        // Adopted tables may hold `0` or rolls wider than `u32`; only a
        // negative value is outside what any writer could have stored.
        if self.roll_no < 0 {
            return Err(RepoError::InvalidData(format!(
                "invalid roll_no `{}` in attendees.roll_no (id {})",
                self.roll_no, self.id
            )));
        }

        let date = NaiveDate::parse_from_str(&self.date, DATE_FORMAT).map_err(|_| {
            RepoError::InvalidData(format!(
                "invalid date `{}` in attendees.date (id {})",
                self.date, self.id
            ))
        })?;

        let subjects = SubjectSet::from_column_value(&self.subjects).map_err(|err| {
            RepoError::InvalidData(format!("{err} in attendees.subjects (id {})", self.id))
        })?;
        if subjects.is_empty() {
            return Err(RepoError::InvalidData(format!(
                "empty subject list in attendees.subjects (id {})",
                self.id
            )));
        }

        Ok(AttendanceRecord {
            id: RecordId::new(self.id),
            name: self.name,
            roll_no: self.roll_no,
            date,
            subjects,
        })
    }
}

fn read_raw_row(row: &Row<'_>) -> RepoResult<RawRecordRow> {
    Ok(RawRecordRow {
        id: row.get("id")?,
        name: row.get("name")?,
        roll_no: row.get("roll_no")?,
        date: row.get("date")?,
        subjects: row.get("subjects")?,
    })
}

fn parse_record_row(row: &Row<'_>) -> RepoResult<AttendanceRecord> {
    read_raw_row(row)?.into_record()
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "attendees")? {
        return Err(RepoError::MissingRequiredTable("attendees"));
    }

    for &column in REQUIRED_COLUMNS {
        if !table_has_column(conn, "attendees", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "attendees",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
