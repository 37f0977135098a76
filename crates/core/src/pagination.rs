//! Page/limit clamping, allow-listed sorting, and pagination metadata.
//!
//! Sort fields are always resolved to one of the `&'static str` entries of a
//! resource's allow-list, so the repository layer can interpolate them into
//! SQL without ever touching user input.

use serde::Serialize;

/// Default page size for list endpoints.
pub const DEFAULT_PAGE_LIMIT: i64 = 10;

/// Maximum page size for list endpoints.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Clamp a user-provided page number to be at least 1.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// Clamp a user-provided limit to `[1, max]`, using `default` when absent.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Parse `asc`/`desc` (case-insensitive). Anything else is `Desc`.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("asc") => SortDirection::Asc,
            _ => SortDirection::Desc,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// A resolved, allow-listed sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: &'static str,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Resolve the requested field against `allowed`, falling back to `default`.
    pub fn resolve(
        requested: Option<&str>,
        direction: Option<&str>,
        allowed: &[&'static str],
        default: &'static str,
    ) -> Self {
        let field = requested
            .and_then(|r| allowed.iter().copied().find(|f| *f == r.trim()))
            .unwrap_or(default);
        Self {
            field,
            direction: SortDirection::parse(direction),
        }
    }
}

/// One page of a sorted listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
    pub sort: SortSpec,
}

impl PageRequest {
    /// Build from raw query values, applying the standard clamps.
    pub fn new(page: Option<i64>, limit: Option<i64>, sort: SortSpec) -> Self {
        Self {
            page: clamp_page(page),
            limit: clamp_limit(limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT),
            sort,
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

/// Pagination block returned alongside list data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    pub current_page: i64,
    pub per_page: i64,
    pub total: i64,
    pub total_pages: i64,
    pub has_next_page: bool,
}

impl PaginationMeta {
    pub fn new(request: &PageRequest, total: i64) -> Self {
        let total_pages = (total + request.limit - 1) / request.limit;
        Self {
            current_page: request.page,
            per_page: request.limit,
            total,
            total_pages,
            has_next_page: request.page < total_pages,
        }
    }
}
