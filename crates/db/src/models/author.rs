//! Author model and DTO.

use schooldesk_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `authors` table. Book author. Names are unique across the table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Author {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Validated input for creating or replacing an author.
#[derive(Debug, Clone)]
pub struct CreateAuthor {
    pub name: String,
}
