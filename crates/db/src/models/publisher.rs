//! Publisher model and DTO.

use schooldesk_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `publishers` table. Names may repeat.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Publisher {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Validated input for creating or replacing a publisher.
#[derive(Debug, Clone)]
pub struct CreatePublisher {
    pub name: String,
}
