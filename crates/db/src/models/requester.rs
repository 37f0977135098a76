//! Requester model and DTO.

use schooldesk_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `requesters` table. Person who submits print requests.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Requester {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Validated input for creating or replacing a requester.
#[derive(Debug, Clone)]
pub struct CreateRequester {
    pub name: String,
}
