//! Repository for the `api_tokens` table.

use schooldesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::api_token::{ApiToken, CreateApiToken};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, token_hash, expires_at, is_revoked, created_at, updated_at";

/// Tracks issued bearer tokens so they can be revoked before expiry.
pub struct ApiTokenRepo;

impl ApiTokenRepo {
    /// Record a newly issued token.
    pub async fn create(pool: &PgPool, input: &CreateApiToken) -> Result<ApiToken, sqlx::Error> {
        let query = format!(
            "INSERT INTO api_tokens (user_id, token_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ApiToken>(&query)
            .bind(input.user_id)
            .bind(&input.token_hash)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find an active token by its hash.
    ///
    /// Only returns tokens that are not revoked and not expired.
    pub async fn find_active_by_hash(
        pool: &PgPool,
        hash: &str,
    ) -> Result<Option<ApiToken>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM api_tokens
             WHERE token_hash = $1
               AND is_revoked = false
               AND expires_at > NOW()"
        );
        sqlx::query_as::<_, ApiToken>(&query)
            .bind(hash)
            .fetch_optional(pool)
            .await
    }

    /// Revoke a single token. Returns `true` if the row was updated.
    pub async fn revoke(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE api_tokens SET is_revoked = true WHERE id = $1 AND is_revoked = false",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
