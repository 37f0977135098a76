//! Shapes shared by the name-only tables (requesters, approvers, authors,
//! publishers).

use schooldesk_core::types::DbId;
use serde::Serialize;

/// Compact `{ id, name }` embedding of a related row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartyRef {
    pub id: DbId,
    pub name: String,
}

impl PartyRef {
    /// Build a reference when the joined name is present, i.e. the related
    /// row exists and is not soft-deleted.
    pub fn from_join(id: DbId, name: Option<String>) -> Option<Self> {
        name.map(|name| Self { id, name })
    }
}

/// Listing filter for name-only tables.
#[derive(Debug, Clone, Default)]
pub struct NameFilter {
    /// Case-insensitive substring match on `name`.
    pub search: Option<String>,
}
