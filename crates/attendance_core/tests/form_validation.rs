use attendance_core::db::open_db_in_memory;
use attendance_core::{
    AttendanceForm, AttendanceService, FormError, FormField, SqliteAttendanceRepository,
    SubmitError, Subject,
};

fn form(name: &str, roll: &str, date: &str, subjects: &[&str]) -> AttendanceForm {
    AttendanceForm {
        name: name.to_string(),
        roll_no: roll.to_string(),
        date: date.to_string(),
        subjects: subjects.iter().map(|value| value.to_string()).collect(),
    }
}

fn rejection_code(err: SubmitError) -> &'static str {
    match err {
        SubmitError::Validation(reason) => reason.code(),
        SubmitError::Repo(err) => panic!("unexpected storage error: {err}"),
    }
}

#[test]
fn valid_submissions_are_listed() {
    let conn = open_db_in_memory().unwrap();
    let service = AttendanceService::new(SqliteAttendanceRepository::try_new(&conn).unwrap());

    let cases = [
        form("Alice Smith", "12", "2024-01-15", &["Python", "JS"]),
        form("Bob", "1", "2000-02-29", &["ML/NLP"]),
        form("Carla de la Cruz", "4294967295", "1999-12-31", &["Java", "MySQL"]),
    ];

    for case in &cases {
        let id = service.submit(case).unwrap();
        let listed = service
            .list()
            .unwrap()
            .into_iter()
            .find(|record| record.id == id)
            .expect("submitted record should be listed");
        assert_eq!(listed.name, case.name.trim());
        assert_eq!(listed.roll_no.to_string(), case.roll_no);
        assert_eq!(listed.date_text(), case.date);
        assert_eq!(listed.subjects.len(), case.subjects.len());
    }
}

#[test]
fn missing_text_fields_are_rejected_without_persisting() {
    let conn = open_db_in_memory().unwrap();
    let service = AttendanceService::new(SqliteAttendanceRepository::try_new(&conn).unwrap());

    let cases = [
        (form("", "1", "2024-01-01", &["JS"]), FormField::Name),
        (form("Ann", "", "2024-01-01", &["JS"]), FormField::RollNo),
        (form("Ann", "1", "  ", &["JS"]), FormField::Date),
        (form(" ", " ", " ", &[]), FormField::Name),
    ];

    for (case, field) in cases {
        match service.submit(&case).unwrap_err() {
            SubmitError::Validation(reason) => assert_eq!(reason, FormError::EmptyField(field)),
            SubmitError::Repo(err) => panic!("unexpected storage error: {err}"),
        }
    }
    assert!(service.list().unwrap().is_empty());
}

#[test]
fn missing_subjects_are_rejected_without_persisting() {
    let conn = open_db_in_memory().unwrap();
    let service = AttendanceService::new(SqliteAttendanceRepository::try_new(&conn).unwrap());

    let err = service
        .submit(&form("Ann", "1", "2024-01-01", &[]))
        .unwrap_err();
    assert_eq!(rejection_code(err), "no_subject_selected");
    assert!(service.list().unwrap().is_empty());
}

#[test]
fn format_violations_report_specific_reasons() {
    let conn = open_db_in_memory().unwrap();
    let service = AttendanceService::new(SqliteAttendanceRepository::try_new(&conn).unwrap());

    let cases = [
        (
            form("John123", "1", "2024-01-01", &["JS"]),
            "invalid_name_characters",
        ),
        (form("John", "12a", "2024-01-01", &["JS"]), "non_numeric_roll"),
        (form("John", "1", "2024-13-40", &["JS"]), "invalid_date_format"),
        (form("John", "1", "2024-01-01", &["Go"]), "unknown_subject"),
    ];

    for (case, expected) in cases {
        let err = service.submit(&case).unwrap_err();
        assert_eq!(rejection_code(err), expected);
    }
    assert!(service.list().unwrap().is_empty());
}

#[test]
fn example_submission_round_trips_as_the_same_subject_set() {
    let conn = open_db_in_memory().unwrap();
    let service = AttendanceService::new(SqliteAttendanceRepository::try_new(&conn).unwrap());

    service
        .submit(&form("Alice Smith", "12", "2024-01-15", &["JS", "Python"]))
        .unwrap();

    let records = service.list().unwrap();
    assert_eq!(records.len(), 1);
    let subjects: Vec<Subject> = records[0].subjects.iter().collect();
    assert_eq!(subjects, vec![Subject::Python, Subject::Js]);
}
