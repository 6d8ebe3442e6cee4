use serde::{Deserialize, Serialize};

/// Request body for creating or replacing a record.
///
/// Every field is optional at the decoding layer so that a missing field is
/// reported by validation ("Name is mandatory") rather than as a JSON error.
/// Unknown keys, including any client-supplied `id`, are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub course: Option<String>,
    pub age: Option<i32>,
}

impl RecordInput {
    pub fn new(name: &str, email: &str, course: &str, age: i32) -> Self {
        Self {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            course: Some(course.to_string()),
            age: Some(age),
        }
    }
}
