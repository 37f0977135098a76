//! Shared query parameter types for list endpoints.

use schooldesk_core::pagination::{PageRequest, SortSpec};
use serde::{Deserialize, Deserializer};

/// `?page=&limit=&sort_by=&sort_direction=`, common to every listing.
///
/// Numeric values are read leniently: anything that does not parse is
/// treated as absent and falls back to the default.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(default, deserialize_with = "lenient")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub limit: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_direction: Option<String>,
}

impl ListParams {
    /// Clamp paging and resolve the sort against a resource's allow-list.
    pub fn page_request(&self, allowed: &[&'static str], default: &'static str) -> PageRequest {
        let sort = SortSpec::resolve(
            self.sort_by.as_deref(),
            self.sort_direction.as_deref(),
            allowed,
            default,
        );
        PageRequest::new(self.page, self.limit, sort)
    }
}

/// `?search=` for the name-only resources.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
}

impl SearchParams {
    /// The trimmed search term, or `None` when blank.
    pub fn term(&self) -> Option<String> {
        non_blank(self.search.as_deref())
    }
}

/// Trim and drop empty strings.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Parse `1`/`0`/`true`/`false`/`yes`/`no`/`on`/`off` (case-insensitive).
pub fn parse_flag(value: Option<&str>) -> Option<bool> {
    match value?.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
pub fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Deserialize an optional integer from a query string, ignoring garbage.
pub fn lenient<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.trim().parse().ok()))
}
