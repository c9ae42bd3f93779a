//! Form validation
//!
//! Each field is checked against its [`FieldKind`]; failures accumulate as
//! one message per line. Uniqueness keys are only checked once all of their
//! columns hold valid values.

use crate::db::{row_exists, SqlValue};
use crate::entities::{EntitySpec, FieldKind};
use chrono::NaiveDate;
use p3510_common::Result;
use sqlx::SqlitePool;
use std::collections::HashMap;

pub const INVALID_STRING: &str = "Invalid string. Only letters are allowed.";
pub const INVALID_SSN: &str = "Invalid SSN format. Expected format: 123-45-6789";
pub const INVALID_INT: &str = "Invalid integer. Only digits are allowed.";
pub const INVALID_EMAIL: &str =
    "Invalid email. Email must include @ and end in 3-letter top level domain.";
pub const INVALID_COURSE: &str = "Invalid course format. Expected format: ABCD-1234";
pub const INVALID_BOOL: &str = "Invalid boolean. Acceptable options are Yes and No.";
pub const INVALID_DATE: &str = "Invalid date. Expected format: YYYY-MM-DD";
pub const END_BEFORE_START: &str = "End date must be after start date.";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Letters and spaces, at least one letter
pub fn is_valid_string(value: &str) -> bool {
    let mut letters = value.chars().filter(|c| *c != ' ').peekable();
    letters.peek().is_some() && letters.all(char::is_alphabetic)
}

/// The nine SSN digits with dashes and spaces removed
pub fn normalize_ssn(value: &str) -> Option<String> {
    let digits: String = value.chars().filter(|c| !matches!(c, '-' | ' ')).collect();
    (digits.len() == 9 && digits.chars().all(|c| c.is_ascii_digit())).then_some(digits)
}

pub fn is_valid_ssn(value: &str) -> bool {
    normalize_ssn(value).is_some()
}

pub fn is_valid_int(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

/// Contains `@` and the text after the last `.` is three characters long
pub fn is_valid_email(value: &str) -> bool {
    value.contains('@')
        && value
            .rsplit_once('.')
            .is_some_and(|(_, tld)| tld.chars().count() == 3)
}

/// Four letters, a dash, four digits: `ABCD-1234`
pub fn is_valid_course(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 9
        && bytes[..4].iter().all(u8::is_ascii_alphabetic)
        && bytes[4] == b'-'
        && bytes[5..].iter().all(u8::is_ascii_digit)
}

pub fn is_valid_bool(value: &str) -> bool {
    value == "1" || value == "0"
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// Check one non-empty value and convert it to its stored form
pub fn convert(kind: FieldKind, raw: &str) -> std::result::Result<SqlValue, &'static str> {
    match kind {
        FieldKind::Name if is_valid_string(raw) => Ok(SqlValue::Text(raw.to_string())),
        FieldKind::Name => Err(INVALID_STRING),
        FieldKind::Text => Ok(SqlValue::Text(raw.to_string())),
        FieldKind::Email if is_valid_email(raw) => Ok(SqlValue::Text(raw.to_string())),
        FieldKind::Email => Err(INVALID_EMAIL),
        FieldKind::Ssn => normalize_ssn(raw).map(SqlValue::Text).ok_or(INVALID_SSN),
        FieldKind::Int | FieldKind::Ref(_) => parse_int(raw).map(SqlValue::Int).ok_or(INVALID_INT),
        FieldKind::Bool if is_valid_bool(raw) => Ok(SqlValue::Int(if raw == "1" { 1 } else { 0 })),
        FieldKind::Bool => Err(INVALID_BOOL),
        FieldKind::Date => parse_date(raw)
            .map(|d| SqlValue::Text(d.format(DATE_FORMAT).to_string()))
            .ok_or(INVALID_DATE),
        FieldKind::Course if is_valid_course(raw) => Ok(SqlValue::Text(raw.to_string())),
        FieldKind::Course => Err(INVALID_COURSE),
    }
}

fn parse_int(raw: &str) -> Option<i64> {
    if is_valid_int(raw) {
        raw.parse().ok()
    } else {
        None
    }
}

/// Result of checking a submitted form
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Column values ready to write, in descriptor order
    Accepted(Vec<(&'static str, SqlValue)>),
    /// Newline-joined messages to show on the form
    Rejected(String),
}

/// Validate `form` against `spec`, including uniqueness against other rows
///
/// `exclude_id` is the row being edited, if any.
pub async fn check_submission(
    pool: &SqlitePool,
    spec: &EntitySpec,
    form: &HashMap<String, String>,
    exclude_id: Option<i64>,
) -> Result<Outcome> {
    let mut messages: Vec<String> = Vec::new();
    let mut values: Vec<(&'static str, SqlValue)> = Vec::with_capacity(spec.fields.len());

    for field in spec.fields {
        let raw = form.get(field.column).map(|s| s.trim()).unwrap_or("");

        if raw.is_empty() {
            if field.required {
                messages.push(format!("{} is required.", field.label));
            } else {
                values.push((field.column, SqlValue::Null));
            }
            continue;
        }

        match convert(field.kind, raw) {
            Ok(value) => values.push((field.column, value)),
            Err(message) => messages.push(message.to_string()),
        }
    }

    if let Some(order) = spec.date_order {
        if let (Some(start), Some(end)) = (date_of(&values, order.start), date_of(&values, order.end)) {
            if start > end {
                messages.push(END_BEFORE_START.to_string());
            }
        }
    }

    for key in spec.unique {
        let key_values: Option<Vec<SqlValue>> = key
            .columns
            .iter()
            .map(|column| value_of(&values, column).filter(|v| !v.is_null()).cloned())
            .collect();

        let Some(key_values) = key_values else {
            continue;
        };

        if row_exists(pool, spec.table, spec.id_column, key.columns, &key_values, exclude_id).await? {
            messages.push(key.message.to_string());
        }
    }

    if messages.is_empty() {
        Ok(Outcome::Accepted(values))
    } else {
        Ok(Outcome::Rejected(messages.join("\n")))
    }
}

fn value_of<'v>(values: &'v [(&'static str, SqlValue)], column: &str) -> Option<&'v SqlValue> {
    values.iter().find(|(c, _)| *c == column).map(|(_, v)| v)
}

fn date_of(values: &[(&'static str, SqlValue)], column: &str) -> Option<NaiveDate> {
    match value_of(values, column)? {
        SqlValue::Text(text) => parse_date(text),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{connect_in_memory, Repository};
    use crate::entities::find;

    #[test]
    fn test_string_validation() {
        assert!(is_valid_string("Ada Lovelace"));
        assert!(is_valid_string("Zoë"));
        assert!(!is_valid_string("R2D2"));
        assert!(!is_valid_string("O'Neil"));
        assert!(!is_valid_string("   "));
    }

    #[test]
    fn test_ssn_validation() {
        assert_eq!(normalize_ssn("123-45-6789").as_deref(), Some("123456789"));
        assert_eq!(normalize_ssn("123 45 6789").as_deref(), Some("123456789"));
        assert_eq!(normalize_ssn("123456789").as_deref(), Some("123456789"));
        assert!(!is_valid_ssn("123-45-678"));
        assert!(!is_valid_ssn("123-45-67890"));
        assert!(!is_valid_ssn("abc-de-fghi"));
    }

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("ada@school.edu"));
        assert!(is_valid_email("first.last@mail.example.com"));
        assert!(!is_valid_email("ada.school.edu"));
        assert!(!is_valid_email("ada@school.io"));
        assert!(!is_valid_email("ada@school.info"));
        assert!(!is_valid_email("ada@localhost"));
        assert!(!is_valid_email("a@b"));
    }

    #[test]
    fn test_course_validation() {
        assert!(is_valid_course("MATH-1010"));
        assert!(!is_valid_course("CS-A-1234"));
        assert!(!is_valid_course("MATH1010"));
        assert!(!is_valid_course("MAT-10100"));
        assert!(!is_valid_course("MATH-10A0"));
        assert!(!is_valid_course("MATH-1010 "));
    }

    #[test]
    fn test_int_bool_date_validation() {
        assert!(is_valid_int("2026"));
        assert!(!is_valid_int("-3"));
        assert!(!is_valid_int("1.5"));
        assert!(!is_valid_int(""));

        assert!(is_valid_bool("1"));
        assert!(is_valid_bool("0"));
        assert!(!is_valid_bool("Yes"));

        assert_eq!(parse_date("2024-02-29"), NaiveDate::from_ymd_opt(2024, 2, 29));
        assert!(parse_date("2023-02-29").is_none());
        assert!(parse_date("02/01/2024").is_none());
    }

    #[test]
    fn test_convert_normalizes_values() {
        assert_eq!(convert(FieldKind::Ssn, "123-45-6789"), Ok(SqlValue::Text("123456789".into())));
        assert_eq!(convert(FieldKind::Bool, "1"), Ok(SqlValue::Int(1)));
        assert_eq!(convert(FieldKind::Int, "99999999999999999999"), Err(INVALID_INT));
        assert_eq!(convert(FieldKind::Date, "2024-1-5"), Ok(SqlValue::Text("2024-01-05".into())));
        assert_eq!(convert(FieldKind::Name, "x1"), Err(INVALID_STRING));
    }

    fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_messages_accumulate_one_per_line() {
        let pool = connect_in_memory().await.unwrap();
        let spec = find("deans").unwrap();

        let outcome = check_submission(
            &pool,
            spec,
            &form(&[
                ("name", "D4n"),
                ("email", "dean-at-school"),
                ("school", "Engineering"),
                ("title", ""),
                ("active", "1"),
            ]),
            None,
        )
        .await
        .unwrap();

        assert_eq!(
            outcome,
            Outcome::Rejected(format!("{}\n{}\nTitle is required.", INVALID_STRING, INVALID_EMAIL))
        );
    }

    #[tokio::test]
    async fn test_optional_fields_become_null() {
        let pool = connect_in_memory().await.unwrap();
        let spec = find("critical_situations").unwrap();

        let outcome = check_submission(
            &pool,
            spec,
            &form(&[("student_id", "4"), ("start_date", "2024-03-01"), ("end_date", "")]),
            None,
        )
        .await
        .unwrap();

        assert_eq!(
            outcome,
            Outcome::Accepted(vec![
                ("student_id", SqlValue::Int(4)),
                ("start_date", SqlValue::Text("2024-03-01".into())),
                ("end_date", SqlValue::Null),
            ])
        );
    }

    #[tokio::test]
    async fn test_end_date_before_start_is_rejected() {
        let pool = connect_in_memory().await.unwrap();
        let spec = find("critical_situations").unwrap();

        let outcome = check_submission(
            &pool,
            spec,
            &form(&[("student_id", "4"), ("start_date", "2024-03-01"), ("end_date", "2024-02-01")]),
            None,
        )
        .await
        .unwrap();

        assert_eq!(outcome, Outcome::Rejected(END_BEFORE_START.to_string()));
    }

    #[tokio::test]
    async fn test_uniqueness_excludes_edited_row() {
        let pool = connect_in_memory().await.unwrap();
        let spec = find("deans").unwrap();
        let submitted = form(&[
            ("name", "Grace Hopper"),
            ("email", "grace@navy.mil"),
            ("school", "Computing"),
            ("title", "Dean"),
            ("active", "1"),
        ]);

        let Outcome::Accepted(values) = check_submission(&pool, spec, &submitted, None).await.unwrap() else {
            panic!("first dean should be accepted");
        };
        let id = Repository::new(&pool, spec).insert(&values).await.unwrap();

        let duplicate = check_submission(&pool, spec, &submitted, None).await.unwrap();
        assert_eq!(
            duplicate,
            Outcome::Rejected("This email is already in use by another dean.".to_string())
        );

        let same_row = check_submission(&pool, spec, &submitted, Some(id)).await.unwrap();
        assert!(matches!(same_row, Outcome::Accepted(_)));
    }
}
