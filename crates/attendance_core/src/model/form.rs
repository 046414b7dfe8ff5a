//! Raw attendance form input and its validator.
//!
//! # Responsibility
//! - Hold the four raw field values exactly as a front end collected them.
//! - Check them against format rules and produce a [`NewAttendanceRecord`].
//!
//! # Invariants
//! - Validation is pure: no I/O, no logging of field values.
//! - Rules are evaluated in a fixed order so each input maps to one reason.

use crate::model::record::{NewAttendanceRecord, DATE_FORMAT};
use crate::model::subject::{parse_subject, SubjectSet};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

// Letter categories only (Lu, Ll, Lt, Lm, Lo); letter numerals such as `Ⅻ` are not names.
static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\p{L} ]+$").expect("valid name regex"));
static ROLL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").expect("valid roll regex"));

/// Raw form values as entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceForm {
    pub name: String,
    pub roll_no: String,
    pub date: String,
    /// Selected subject labels. Duplicates collapse during validation.
    pub subjects: Vec<String>,
}

/// Text fields of the attendance form, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    RollNo,
    Date,
}

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::RollNo => "Roll No",
            Self::Date => "Date",
        }
    }
}

/// Reason a form submission was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// A required text field is empty after trimming.
    EmptyField(FormField),
    InvalidNameCharacters,
    /// Roll is not a positive decimal integer that fits in `u32`.
    NonNumericRoll,
    InvalidDateFormat,
    NoSubjectSelected,
    UnknownSubject(String),
}

impl FormError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyField(_) => "empty_field",
            Self::InvalidNameCharacters => "invalid_name_characters",
            Self::NonNumericRoll => "non_numeric_roll",
            Self::InvalidDateFormat => "invalid_date_format",
            Self::NoSubjectSelected => "no_subject_selected",
            Self::UnknownSubject(_) => "unknown_subject",
        }
    }
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(
                f,
                "All fields must be filled out. ({} is empty)",
                field.label()
            ),
            Self::InvalidNameCharacters => write!(f, "Name must contain only letters and spaces."),
            Self::NonNumericRoll => write!(f, "Roll No must be a positive number."),
            Self::InvalidDateFormat => write!(f, "Date must be in YYYY-MM-DD format."),
            Self::NoSubjectSelected => write!(f, "At least one subject must be selected."),
            Self::UnknownSubject(label) => write!(f, "Unknown subject `{label}`."),
        }
    }
}

impl Error for FormError {}

impl AttendanceForm {
    /// Validates raw input and returns a record ready for insertion.
    ///
    /// # Errors
    /// - `EmptyField` for the first empty text field (name, roll, date).
    /// - `NoSubjectSelected` when no subject label was given.
    /// - `InvalidNameCharacters`, `NonNumericRoll`, `InvalidDateFormat`,
    ///   `UnknownSubject` for the respective format violations.
    pub fn validate(&self) -> Result<NewAttendanceRecord, FormError> {
        let name = self.name.trim();
        let roll_no = self.roll_no.trim();
        let date = self.date.trim();

        for (value, field) in [
            (name, FormField::Name),
            (roll_no, FormField::RollNo),
            (date, FormField::Date),
        ] {
            if value.is_empty() {
                return Err(FormError::EmptyField(field));
            }
        }
        if self.subjects.iter().all(|label| label.trim().is_empty()) {
            return Err(FormError::NoSubjectSelected);
        }

        if !NAME_RE.is_match(name) {
            return Err(FormError::InvalidNameCharacters);
        }

        if !ROLL_RE.is_match(roll_no) {
            return Err(FormError::NonNumericRoll);
        }
        let roll_no = match roll_no.parse::<u32>() {
            Ok(0) | Err(_) => return Err(FormError::NonNumericRoll),
            Ok(value) => value,
        };

        let date = NaiveDate::parse_from_str(date, DATE_FORMAT)
            .map_err(|_| FormError::InvalidDateFormat)?;

        let mut subjects = SubjectSet::new();
        for label in self.subjects.iter().filter(|label| !label.trim().is_empty()) {
            let subject = parse_subject(label)
                .map_err(|_| FormError::UnknownSubject(label.trim().to_string()))?;
            subjects.insert(subject);
        }

        Ok(NewAttendanceRecord {
            name: name.to_string(),
            roll_no,
            date,
            subjects,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{AttendanceForm, FormError, FormField};
    use crate::model::subject::Subject;

    fn form(name: &str, roll: &str, date: &str, subjects: &[&str]) -> AttendanceForm {
        AttendanceForm {
            name: name.to_string(),
            roll_no: roll.to_string(),
            date: date.to_string(),
            subjects: subjects.iter().map(|value| value.to_string()).collect(),
        }
    }

    #[test]
    fn valid_form_is_trimmed_and_normalized() {
        let record = form("  Alice Smith ", " 12 ", "2024-01-15", &["JS", "Python", "JS"])
            .validate()
            .unwrap();
        assert_eq!(record.name(), "Alice Smith");
        assert_eq!(record.roll_no(), 12);
        assert_eq!(record.date().to_string(), "2024-01-15");
        assert_eq!(record.subjects().len(), 2);
        assert!(record.subjects().contains(Subject::Python));
        assert!(record.subjects().contains(Subject::Js));
    }

    #[test]
    fn empty_field_reports_first_missing_field() {
        assert_eq!(
            form("   ", "", "", &[]).validate().unwrap_err(),
            FormError::EmptyField(FormField::Name)
        );
        assert_eq!(
            form("Bob", " ", "2024-01-15", &["JS"]).validate().unwrap_err(),
            FormError::EmptyField(FormField::RollNo)
        );
        assert_eq!(
            form("Bob", "3", "", &["JS"]).validate().unwrap_err(),
            FormError::EmptyField(FormField::Date)
        );
    }

    #[test]
    fn empty_text_field_takes_precedence_over_format_errors() {
        let err = form("John123", "", "2024-01-15", &["JS"])
            .validate()
            .unwrap_err();
        assert_eq!(err.code(), "empty_field");
    }

    #[test]
    fn missing_subjects_are_rejected() {
        assert_eq!(
            form("Bob", "3", "2024-01-15", &[]).validate().unwrap_err(),
            FormError::NoSubjectSelected
        );
        assert_eq!(
            form("Bob", "3", "2024-01-15", &["  "]).validate().unwrap_err(),
            FormError::NoSubjectSelected
        );
    }

    #[test]
    fn name_with_digits_is_rejected() {
        assert_eq!(
            form("John123", "1", "2024-01-15", &["JS"])
                .validate()
                .unwrap_err(),
            FormError::InvalidNameCharacters
        );
    }

    #[test]
    fn non_ascii_letters_are_accepted_in_names() {
        assert!(form("José Ñúñez", "1", "2024-01-15", &["JS"])
            .validate()
            .is_ok());
    }

    #[test]
    fn letter_numerals_and_combining_marks_are_not_name_letters() {
        for name in ["Henry Ⅻ", "Zoe\u{301}"] {
            assert_eq!(
                form(name, "1", "2024-01-15", &["JS"]).validate().unwrap_err(),
                FormError::InvalidNameCharacters,
                "name {name:?} should be rejected"
            );
        }
    }

    #[test]
    fn roll_must_be_positive_digits() {
        for roll in ["12a", "-4", "+4", "1.5", "0", "000", "99999999999"] {
            assert_eq!(
                form("Bob", roll, "2024-01-15", &["JS"])
                    .validate()
                    .unwrap_err(),
                FormError::NonNumericRoll,
                "roll `{roll}`"
            );
        }
    }

    #[test]
    fn impossible_dates_are_rejected() {
        for date in ["2024-13-40", "2023-02-29", "15/01/2024", "2024-01-15T00:00"] {
            assert_eq!(
                form("Bob", "1", date, &["JS"]).validate().unwrap_err(),
                FormError::InvalidDateFormat,
                "date `{date}`"
            );
        }
        assert!(form("Bob", "1", "2024-02-29", &["JS"]).validate().is_ok());
    }

    #[test]
    fn unknown_subject_is_rejected_after_format_checks() {
        assert_eq!(
            form("Bob", "1", "2024-01-15", &["Python", " Rust "])
                .validate()
                .unwrap_err(),
            FormError::UnknownSubject("Rust".to_string())
        );
    }

    #[test]
    fn error_messages_name_the_rule() {
        assert_eq!(
            FormError::InvalidDateFormat.to_string(),
            "Date must be in YYYY-MM-DD format."
        );
        assert!(FormError::EmptyField(FormField::RollNo)
            .to_string()
            .contains("Roll No"));
    }
}
