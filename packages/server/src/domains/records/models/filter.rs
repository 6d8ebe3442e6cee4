use std::fmt;

/// Search strategy for listing records.
///
/// Exactly one strategy is chosen per request. Filter values are stored
/// already trimmed and are never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordFilter {
    /// Name contains `name` AND course contains `course` (case-insensitive).
    NameAndCourse { name: String, course: String },
    /// Name contains the value (case-insensitive).
    Name(String),
    /// Course contains the value (case-insensitive).
    Course(String),
    /// No filtering.
    All,
}

impl RecordFilter {
    /// Select a strategy from raw query parameters.
    ///
    /// Absent, empty and whitespace-only values all count as "not given".
    /// Branch order: both, name only, course only, neither.
    pub fn from_params(name: Option<&str>, course: Option<&str>) -> Self {
        let name = name.map(str::trim).filter(|s| !s.is_empty());
        let course = course.map(str::trim).filter(|s| !s.is_empty());

        match (name, course) {
            (Some(name), Some(course)) => RecordFilter::NameAndCourse {
                name: name.to_string(),
                course: course.to_string(),
            },
            (Some(name), None) => RecordFilter::Name(name.to_string()),
            (None, Some(course)) => RecordFilter::Course(course.to_string()),
            (None, None) => RecordFilter::All,
        }
    }

    /// Case-insensitive "contains" check against a record's fields.
    pub fn matches(&self, name: &str, course: &str) -> bool {
        match self {
            RecordFilter::NameAndCourse {
                name: name_filter,
                course: course_filter,
            } => {
                contains_ignore_case(name, name_filter)
                    && contains_ignore_case(course, course_filter)
            }
            RecordFilter::Name(name_filter) => contains_ignore_case(name, name_filter),
            RecordFilter::Course(course_filter) => contains_ignore_case(course, course_filter),
            RecordFilter::All => true,
        }
    }

    /// `ILIKE` pattern matching `value` anywhere, with `\`, `%` and `_`
    /// escaped so the filter is matched literally (use with `ESCAPE '\'`).
    pub fn contains_pattern(value: &str) -> String {
        let mut pattern = String::with_capacity(value.len() + 2);
        pattern.push('%');
        for c in value.chars() {
            if matches!(c, '\\' | '%' | '_') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }

    /// Short label for logging.
    pub fn strategy(&self) -> &'static str {
        match self {
            RecordFilter::NameAndCourse { .. } => "name_and_course",
            RecordFilter::Name(_) => "name",
            RecordFilter::Course(_) => "course",
            RecordFilter::All => "all",
        }
    }
}

impl fmt::Display for RecordFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordFilter::NameAndCourse { name, course } => {
                write!(f, "name~'{}' AND course~'{}'", name, course)
            }
            RecordFilter::Name(name) => write!(f, "name~'{}'", name),
            RecordFilter::Course(course) => write!(f, "course~'{}'", course),
            RecordFilter::All => write!(f, "all"),
        }
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_filters_select_and_strategy() {
        let filter = RecordFilter::from_params(Some(" ali "), Some("math"));
        assert_eq!(
            filter,
            RecordFilter::NameAndCourse {
                name: "ali".to_string(),
                course: "math".to_string()
            }
        );
    }

    #[test]
    fn single_filters() {
        assert_eq!(
            RecordFilter::from_params(Some("ali"), None),
            RecordFilter::Name("ali".to_string())
        );
        assert_eq!(
            RecordFilter::from_params(None, Some("math")),
            RecordFilter::Course("math".to_string())
        );
    }

    #[test]
    fn blank_values_count_as_absent() {
        assert_eq!(RecordFilter::from_params(Some("   "), None), RecordFilter::All);
        assert_eq!(RecordFilter::from_params(Some(""), Some("\t")), RecordFilter::All);
        assert_eq!(
            RecordFilter::from_params(Some("   "), Some("math")),
            RecordFilter::Course("math".to_string())
        );
    }

    #[test]
    fn matches_is_case_insensitive_contains() {
        let filter = RecordFilter::Name("ALI".to_string());
        assert!(filter.matches("Alice", "Math"));
        assert!(filter.matches("Natalia", "Math"));
        assert!(!filter.matches("Bob", "Math"));
    }

    #[test]
    fn and_strategy_requires_both() {
        let filter = RecordFilter::from_params(Some("ali"), Some("math"));
        assert!(filter.matches("Alice", "Math"));
        assert!(!filter.matches("Alicia", "Physics"));
        assert!(!filter.matches("Bob", "Math"));
    }

    #[test]
    fn pattern_escapes_wildcards() {
        assert_eq!(RecordFilter::contains_pattern("ali"), "%ali%");
        assert_eq!(RecordFilter::contains_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }
}
