//! Repository for the `requesters` table.

use schooldesk_core::pagination::PageRequest;
use schooldesk_core::types::DbId;
use sqlx::PgPool;

use super::named;
use crate::models::named::NameFilter;
use crate::models::requester::{CreateRequester, Requester};

const TABLE: &str = "requesters";

/// Provides CRUD operations for requesters.
pub struct RequesterRepo;

impl RequesterRepo {
    /// Fields a listing may be sorted by.
    pub const SORT_FIELDS: &'static [&'static str] = named::SORT_FIELDS;
    pub const DEFAULT_SORT: &'static str = "created_at";

    /// Insert a new requester, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateRequester) -> Result<Requester, sqlx::Error> {
        named::create(pool, TABLE, &input.name).await
    }

    /// Find a requester by ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Requester>, sqlx::Error> {
        named::find_by_id(pool, TABLE, id).await
    }

    /// One page of live requesters matching `filter`.
    pub async fn list(
        pool: &PgPool,
        filter: &NameFilter,
        page: &PageRequest,
    ) -> Result<Vec<Requester>, sqlx::Error> {
        named::list(pool, TABLE, filter, page).await
    }

    /// Count live requesters matching `filter` (for pagination metadata).
    pub async fn count(pool: &PgPool, filter: &NameFilter) -> Result<i64, sqlx::Error> {
        named::count(pool, TABLE, filter).await
    }

    /// Replace a requester's fields. Returns `None` if no live row has `id`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &CreateRequester,
    ) -> Result<Option<Requester>, sqlx::Error> {
        named::update(pool, TABLE, id, &input.name).await
    }

    /// Soft-delete a requester by ID. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        named::soft_delete(pool, TABLE, id).await
    }

    /// Whether a live requester with `id` exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        named::exists(pool, TABLE, id).await
    }
}
