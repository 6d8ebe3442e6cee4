//! Field validation for record input.
//!
//! Rules are an ordered list of `(field, predicate, message)`. Every rule is
//! evaluated; a later failure on the same field replaces an earlier message,
//! so the resulting map is deterministic.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;

use crate::domains::records::data::RecordInput;

/// Minimum accepted age.
pub const MIN_AGE: i32 = 18;

/// field name -> human-readable message (one per field).
pub type FieldErrors = BTreeMap<String, String>;

lazy_static! {
    // Local part: dot-separated atoms, non-ASCII allowed. Domain: either
    // dot-separated labels that start and end alphanumeric (single-label
    // domains such as `localhost` pass) or a bracketed IP literal.
    static ref EMAIL_PATTERN: Regex = Regex::new(concat!(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~\-\x{80}-\x{10FFFF}]+",
        r"(\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~\-\x{80}-\x{10FFFF}]+)*",
        r"@(",
        r"[A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?(\.[A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?)*",
        r"|\[[0-9]{1,3}(\.[0-9]{1,3}){3}\]",
        r"|\[IPv6:[0-9A-Fa-f:.]+\]",
        r")$",
    ))
    .expect("email pattern is valid");
}

/// A single validation rule.
pub struct Rule {
    pub field: &'static str,
    pub check: fn(&RecordInput) -> bool,
    pub message: &'static str,
}

/// Ordered rule list applied on create and update.
pub static RULES: &[Rule] = &[
    Rule {
        field: "name",
        check: |input| !is_blank(input.name.as_deref()),
        message: "Name is mandatory",
    },
    Rule {
        field: "email",
        check: |input| !is_blank(input.email.as_deref()),
        message: "Email is mandatory",
    },
    Rule {
        field: "email",
        // Only judged when something was supplied; emptiness is the rule above.
        check: |input| match input.email.as_deref() {
            None | Some("") => true,
            Some(email) => is_valid_email(email),
        },
        message: "Email should be a valid format",
    },
    Rule {
        field: "course",
        check: |input| !is_blank(input.course.as_deref()),
        message: "Course is mandatory",
    },
    Rule {
        field: "age",
        check: |input| input.age.is_some(),
        message: "Age is mandatory",
    },
    Rule {
        field: "age",
        check: |input| input.age.map_or(true, |age| age >= MIN_AGE),
        message: "Student must be at least 18 years old",
    },
];

/// Input that passed every rule. Only this type can reach storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRecord {
    pub name: String,
    pub email: String,
    pub course: String,
    pub age: i32,
}

/// Run every rule against `input`.
pub fn validate(input: &RecordInput) -> Result<ValidRecord, FieldErrors> {
    let mut errors = FieldErrors::new();
    for rule in RULES {
        if !(rule.check)(input) {
            errors.insert(rule.field.to_string(), rule.message.to_string());
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    match (&input.name, &input.email, &input.course, input.age) {
        (Some(name), Some(email), Some(course), Some(age)) => Ok(ValidRecord {
            name: name.clone(),
            email: email.clone(),
            course: course.clone(),
            age,
        }),
        // Unreachable while the presence rules above exist.
        _ => Err(errors),
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |s| s.trim().is_empty())
}
