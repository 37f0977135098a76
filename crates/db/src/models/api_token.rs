//! Issued bearer token model and DTO.

use schooldesk_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `api_tokens` table.
#[derive(Debug, Clone, FromRow)]
pub struct ApiToken {
    pub id: DbId,
    pub user_id: DbId,
    /// SHA-256 hex digest of the token's `jti` claim.
    pub token_hash: String,
    pub expires_at: Timestamp,
    pub is_revoked: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

pub struct CreateApiToken {
    pub user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
}
