//! Repository for the `authors` table.

use schooldesk_core::pagination::PageRequest;
use schooldesk_core::types::DbId;
use sqlx::PgPool;

use super::named;
use crate::models::author::{Author, CreateAuthor};
use crate::models::named::NameFilter;

const TABLE: &str = "authors";

/// Provides CRUD operations for authors.
pub struct AuthorRepo;

impl AuthorRepo {
    /// Fields a listing may be sorted by.
    pub const SORT_FIELDS: &'static [&'static str] = named::SORT_FIELDS;
    pub const DEFAULT_SORT: &'static str = "created_at";

    /// Insert a new author, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateAuthor) -> Result<Author, sqlx::Error> {
        named::create(pool, TABLE, &input.name).await
    }

    /// Find an author by ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Author>, sqlx::Error> {
        named::find_by_id(pool, TABLE, id).await
    }

    /// One page of live authors matching `filter`.
    pub async fn list(
        pool: &PgPool,
        filter: &NameFilter,
        page: &PageRequest,
    ) -> Result<Vec<Author>, sqlx::Error> {
        named::list(pool, TABLE, filter, page).await
    }

    /// Count live authors matching `filter` (for pagination metadata).
    pub async fn count(pool: &PgPool, filter: &NameFilter) -> Result<i64, sqlx::Error> {
        named::count(pool, TABLE, filter).await
    }

    /// Replace an author's fields. Returns `None` if no live row has `id`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &CreateAuthor,
    ) -> Result<Option<Author>, sqlx::Error> {
        named::update(pool, TABLE, id, &input.name).await
    }

    /// Soft-delete an author by ID. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        named::soft_delete(pool, TABLE, id).await
    }

    /// Whether a live author with `id` exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        named::exists(pool, TABLE, id).await
    }

    /// Whether `name` is already used by another author.
    ///
    /// Soft-deleted authors count too: `uq_authors_name` spans the whole table.
    pub async fn name_taken(
        pool: &PgPool,
        name: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                SELECT 1 FROM authors
                WHERE name = $1 AND ($2::BIGINT IS NULL OR id <> $2)
            )",
        )
        .bind(name)
        .bind(exclude_id)
        .fetch_one(pool)
        .await
    }
}
