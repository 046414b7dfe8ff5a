//! Subject catalog and set-valued subject selection.
//!
//! # Responsibility
//! - Enumerate the fixed catalog of selectable subjects.
//! - Encode/decode subject sets to the delimited `attendees.subjects` column.
//!
//! # Invariants
//! - No catalog label contains [`SUBJECT_DELIMITER`]; labels are never escaped.
//! - `SubjectSet` iterates in catalog order regardless of insertion order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Separator character between labels in the persisted subjects column.
pub const SUBJECT_DELIMITER: char = ',';

const SUBJECT_JOINER: &str = ", ";

/// Catalog label for the Python course.
pub const SUBJECT_PYTHON: &str = "Python";
/// Catalog label for the ML/NLP course.
pub const SUBJECT_ML_NLP: &str = "ML/NLP";
/// Catalog label for the JavaScript course.
pub const SUBJECT_JS: &str = "JS";
/// Catalog label for the Java course.
pub const SUBJECT_JAVA: &str = "Java";
/// Catalog label for the MySQL course.
pub const SUBJECT_MYSQL: &str = "MySQL";

/// One selectable subject from the fixed catalog.
///
/// Variant order is the catalog display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Subject {
    #[serde(rename = "Python")]
    Python,
    #[serde(rename = "ML/NLP")]
    MlNlp,
    #[serde(rename = "JS")]
    Js,
    #[serde(rename = "Java")]
    Java,
    #[serde(rename = "MySQL")]
    MySql,
}

const CATALOG: &[Subject] = &[
    Subject::Python,
    Subject::MlNlp,
    Subject::Js,
    Subject::Java,
    Subject::MySql,
];

impl Subject {
    /// Returns the full catalog in display order.
    pub fn catalog() -> &'static [Subject] {
        CATALOG
    }

    /// Stable label shown to users and persisted in storage.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Python => SUBJECT_PYTHON,
            Self::MlNlp => SUBJECT_ML_NLP,
            Self::Js => SUBJECT_JS,
            Self::Java => SUBJECT_JAVA,
            Self::MySql => SUBJECT_MYSQL,
        }
    }
}

impl Display for Subject {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Subject {
    type Err = SubjectError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        parse_subject(value)
    }
}

/// Parses one catalog label. Matching is exact after trimming.
pub fn parse_subject(value: &str) -> Result<Subject, SubjectError> {
    let normalized = value.trim();
    CATALOG
        .iter()
        .copied()
        .find(|subject| subject.as_str() == normalized)
        .ok_or_else(|| SubjectError::Unknown(normalized.to_string()))
}

/// Subject catalog parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectError {
    Unknown(String),
}

impl Display for SubjectError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown(label) => write!(
                f,
                "unknown subject `{label}`; expected one of {}",
                catalog_labels().join("|")
            ),
        }
    }
}

impl Error for SubjectError {}

/// Returns all catalog labels in display order.
pub fn catalog_labels() -> Vec<&'static str> {
    CATALOG.iter().map(|subject| subject.as_str()).collect()
}

/// Order-independent set of selected subjects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectSet(BTreeSet<Subject>);

impl SubjectSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one subject. Returns `false` if it was already selected.
    pub fn insert(&mut self, subject: Subject) -> bool {
        self.0.insert(subject)
    }

    pub fn contains(&self, subject: Subject) -> bool {
        self.0.contains(&subject)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates selected subjects in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = Subject> + '_ {
        self.0.iter().copied()
    }

    /// Encodes the set for the `attendees.subjects` column.
    ///
    /// Labels are emitted in catalog order and joined by `", "`.
    pub fn to_column_value(&self) -> String {
        self.iter()
            .map(Subject::as_str)
            .collect::<Vec<_>>()
            .join(SUBJECT_JOINER)
    }

    /// Decodes a persisted subjects column value.
    ///
    /// Empty pieces are skipped so both `"A,B"` and `"A, B"` are accepted.
    pub fn from_column_value(value: &str) -> Result<Self, SubjectError> {
        let mut set = Self::new();
        for piece in value.split(SUBJECT_DELIMITER) {
            if piece.trim().is_empty() {
                continue;
            }
            set.insert(parse_subject(piece)?);
        }
        Ok(set)
    }
}

impl FromIterator<Subject> for SubjectSet {
    fn from_iter<T: IntoIterator<Item = Subject>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Display for SubjectSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_column_value())
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_subject, Subject, SubjectError, SubjectSet, SUBJECT_DELIMITER};

    #[test]
    fn catalog_labels_never_contain_delimiter() {
        for subject in Subject::catalog() {
            assert!(
                !subject.as_str().contains(SUBJECT_DELIMITER),
                "label {} would break column encoding",
                subject.as_str()
            );
        }
    }

    #[test]
    fn parse_subject_trims_and_matches_exactly() {
        assert_eq!(parse_subject(" ML/NLP ").unwrap(), Subject::MlNlp);
        assert_eq!(
            parse_subject("python").unwrap_err(),
            SubjectError::Unknown("python".to_string())
        );
    }

    #[test]
    fn column_value_is_catalog_ordered() {
        let set: SubjectSet = [Subject::MySql, Subject::Python, Subject::Js]
            .into_iter()
            .collect();
        assert_eq!(set.to_column_value(), "Python, JS, MySQL");
    }

    #[test]
    fn from_column_value_accepts_legacy_spacing() {
        let set = SubjectSet::from_column_value("JS,Python , ML/NLP").unwrap();
        assert_eq!(set.len(), 3);
        assert!(set.contains(Subject::Python));
        assert!(set.contains(Subject::MlNlp));
        assert!(set.contains(Subject::Js));
    }

    #[test]
    fn from_column_value_rejects_unknown_label() {
        let err = SubjectSet::from_column_value("Python, Rust").unwrap_err();
        assert_eq!(err, SubjectError::Unknown("Rust".to_string()));
    }

    #[test]
    fn serializes_as_label_array() {
        let set: SubjectSet = [Subject::Js, Subject::MlNlp].into_iter().collect();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["ML/NLP","JS"]"#);
    }
}
