//! Offset-based pagination and sorting types
//!
//! Request side: `PageParams` is collected from the query string
//! (`?page=&size=&sort=field,direction`, `sort` repeatable) and normalized
//! into a `PageRequest`.
//! Response side: `Page<T>` is a slice of an ordered result set plus the
//! total-count metadata clients use to navigate.
//!
//! # Usage
//!
//! ```rust,ignore
//! let request = params.validate()?;
//! let (items, total) = Record::find_page(&filter, &request, pool).await?;
//! let page = Page::new(items, total, &request);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Page size used when the client does not ask for one (or asks for < 1).
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Upper bound on page size; larger requests are clamped.
pub const MAX_PAGE_SIZE: i64 = 2000;

/// Largest accepted zero-based page index.
pub const MAX_PAGE_INDEX: i64 = i32::MAX as i64;

// ============================================================================
// Sorting
// ============================================================================

/// Columns a page may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Id,
    Name,
    Email,
    Course,
    Age,
}

impl SortField {
    /// Column name in the `records` table. Only these fixed strings ever reach SQL.
    pub fn column(self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Name => "name",
            SortField::Email => "email",
            SortField::Course => "course",
            SortField::Age => "age",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "id" => Some(SortField::Id),
            "name" => Some(SortField::Name),
            "email" => Some(SortField::Email),
            "course" => Some(SortField::Course),
            "age" => Some(SortField::Age),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("asc") {
            Some(SortDirection::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Some(SortDirection::Desc)
        } else {
            None
        }
    }
}

/// One `property direction` pair of an ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortKey {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}

/// Requested ordering: keys applied left to right. Defaults to `id ASC`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOrder {
    keys: Vec<SortKey>,
}

impl Default for SortOrder {
    fn default() -> Self {
        Self {
            keys: vec![SortKey::default()],
        }
    }
}

impl SortOrder {
    /// Single-key ordering.
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self {
            keys: vec![SortKey::new(field, direction)],
        }
    }

    /// Ordering from several keys; an empty list means the default.
    pub fn from_keys(keys: Vec<SortKey>) -> Self {
        if keys.is_empty() {
            Self::default()
        } else {
            Self { keys }
        }
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    /// Parse one `sort` parameter: `prop[,prop...][,direction]`.
    ///
    /// A trailing `asc`/`desc` applies to every property before it; without
    /// one all properties sort ascending. Empty segments are ignored.
    pub fn parse(raw: &str) -> Result<Vec<SortKey>, PageParamError> {
        let mut parts: Vec<&str> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        let direction = match parts.last().and_then(|last| SortDirection::parse(last)) {
            Some(direction) => {
                parts.pop();
                direction
            }
            None => SortDirection::Asc,
        };

        if parts.is_empty() {
            return Err(PageParamError {
                field: "sort",
                message: format!("Sort '{}' names no property", raw),
            });
        }

        parts
            .into_iter()
            .map(|property| {
                SortField::parse(property)
                    .map(|field| SortKey::new(field, direction))
                    .ok_or_else(|| PageParamError {
                        field: "sort",
                        message: format!("Unknown sort property '{}'", property),
                    })
            })
            .collect()
    }

    /// `ORDER BY` body. Unless id is already one of the keys, `id ASC` is
    /// appended so pages are stable.
    pub fn order_by_clause(&self) -> String {
        let mut columns: Vec<String> = self
            .keys
            .iter()
            .map(|key| format!("{} {}", key.field.column(), key.direction.sql()))
            .collect();
        if !self.keys.iter().any(|key| key.field == SortField::Id) {
            columns.push("id ASC".to_string());
        }
        columns.join(", ")
    }
}

// ============================================================================
// Request parameters
// ============================================================================

/// Rejected paging or sort parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageParamError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for PageParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for PageParamError {}

/// Raw query-string parameters. Kept as strings so that an empty or
/// unparseable value (`?page=`, `?size=abc`) falls back to the default
/// instead of failing to decode. `sort` may repeat.
#[derive(Debug, Clone, Default)]
pub struct PageParams {
    pub page: Option<String>,
    pub size: Option<String>,
    pub sort: Vec<String>,
}

impl PageParams {
    /// Normalize into a `PageRequest`.
    ///
    /// - missing, empty or non-numeric page → 0; negative page → 0;
    ///   page > `MAX_PAGE_INDEX` → `MAX_PAGE_INDEX`
    /// - missing, empty or non-numeric size → `DEFAULT_PAGE_SIZE`;
    ///   size < 1 → `DEFAULT_PAGE_SIZE`, size > `MAX_PAGE_SIZE` → `MAX_PAGE_SIZE`
    /// - no sort → `id,asc`
    ///
    /// Only an unknown sort property is an error.
    pub fn validate(&self) -> Result<PageRequest, PageParamError> {
        let page = parse_number(self.page.as_deref())
            .unwrap_or(0)
            .clamp(0, MAX_PAGE_INDEX);

        let size = match parse_number(self.size.as_deref()) {
            Some(s) if s < 1 => DEFAULT_PAGE_SIZE,
            Some(s) => s.min(MAX_PAGE_SIZE),
            None => DEFAULT_PAGE_SIZE,
        };

        let mut keys = Vec::new();
        for raw in self.sort.iter().filter(|raw| !raw.trim().is_empty()) {
            keys.extend(SortOrder::parse(raw)?);
        }

        Ok(PageRequest {
            page,
            size,
            sort: SortOrder::from_keys(keys),
        })
    }
}

fn parse_number(raw: Option<&str>) -> Option<i64> {
    raw.map(str::trim).and_then(|s| s.parse::<i64>().ok())
}

/// Validated and normalized page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page index.
    pub page: i64,
    /// Page size (1..=MAX_PAGE_SIZE).
    pub size: i64,
    pub sort: SortOrder,
}

impl PageRequest {
    pub fn new(page: i64, size: i64, sort: SortOrder) -> Self {
        Self { page, size, sort }
    }

    /// Row offset of the first element on this page.
    pub fn offset(&self) -> i64 {
        self.page.saturating_mul(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE, SortOrder::default())
    }
}

// ============================================================================
// Page
// ============================================================================

/// One page of results plus navigation metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: i64,
    pub total_pages: i64,
    /// Zero-based index of this page.
    pub number: i64,
    /// Requested page size.
    pub size: i64,
    pub number_of_elements: i64,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, total_elements: i64, request: &PageRequest) -> Self {
        let total_pages = if request.size > 0 {
            (total_elements + request.size - 1) / request.size
        } else {
            0
        };
        let number_of_elements = content.len() as i64;

        Page {
            empty: content.is_empty(),
            content,
            total_elements,
            total_pages,
            number: request.page,
            size: request.size,
            number_of_elements,
            first: request.page == 0,
            last: request.page >= total_pages.saturating_sub(1),
        }
    }
}
