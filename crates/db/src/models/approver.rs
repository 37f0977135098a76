//! Approver model and DTO.

use schooldesk_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `approvers` table. Person who authorizes print requests.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Approver {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Validated input for creating or replacing an approver.
#[derive(Debug, Clone)]
pub struct CreateApprover {
    pub name: String,
}
