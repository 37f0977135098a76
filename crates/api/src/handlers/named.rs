//! Payload and echo types shared by the name-only resources
//! (requesters, approvers, authors, publishers).

use schooldesk_core::validation::{string_message, FieldErrors};
use schooldesk_db::models::named::NameFilter;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppResult;
use crate::extract::BodyField;

/// Request body for creating or replacing a name-only row.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NamePayload {
    pub name: BodyField<String>,
}

#[derive(Debug, Validate)]
struct NameRules {
    #[validate(length(max = 255))]
    name: Option<String>,
}

impl NamePayload {
    /// Run the field rules, returning the trimmed name alongside any errors.
    ///
    /// Callers with extra rules (author name uniqueness) add to the returned
    /// map before rejecting.
    pub fn check(&self) -> (Option<String>, FieldErrors) {
        let mut errors = FieldErrors::new();
        let rules = NameRules {
            name: self.name.clone().check(&mut errors, "name", string_message),
        };
        errors.merge(rules.validate());
        let name = errors.require_text("name", rules.name.as_deref());
        (name, errors)
    }

    /// Validate and return the trimmed name, or a 422.
    pub fn into_name(self) -> AppResult<String> {
        match self.check() {
            (Some(name), errors) if errors.is_empty() => Ok(name),
            (_, errors) => Err(errors.into()),
        }
    }
}

/// Echo of the `search` filter on name-only listings.
#[derive(Debug, Serialize)]
pub struct SearchEcho {
    pub search_term: Option<String>,
}

impl From<&NameFilter> for SearchEcho {
    fn from(filter: &NameFilter) -> Self {
        Self {
            search_term: filter.search.clone(),
        }
    }
}
