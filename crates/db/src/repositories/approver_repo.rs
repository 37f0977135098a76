//! Repository for the `approvers` table.

use schooldesk_core::pagination::PageRequest;
use schooldesk_core::types::DbId;
use sqlx::PgPool;

use super::named;
use crate::models::approver::{Approver, CreateApprover};
use crate::models::named::NameFilter;

const TABLE: &str = "approvers";

/// Provides CRUD operations for approvers.
pub struct ApproverRepo;

impl ApproverRepo {
    /// Fields a listing may be sorted by.
    pub const SORT_FIELDS: &'static [&'static str] = named::SORT_FIELDS;
    pub const DEFAULT_SORT: &'static str = "created_at";

    /// Insert a new approver, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateApprover) -> Result<Approver, sqlx::Error> {
        named::create(pool, TABLE, &input.name).await
    }

    /// Find an approver by ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Approver>, sqlx::Error> {
        named::find_by_id(pool, TABLE, id).await
    }

    /// One page of live approvers matching `filter`.
    pub async fn list(
        pool: &PgPool,
        filter: &NameFilter,
        page: &PageRequest,
    ) -> Result<Vec<Approver>, sqlx::Error> {
        named::list(pool, TABLE, filter, page).await
    }

    /// Count live approvers matching `filter` (for pagination metadata).
    pub async fn count(pool: &PgPool, filter: &NameFilter) -> Result<i64, sqlx::Error> {
        named::count(pool, TABLE, filter).await
    }

    /// Replace an approver's fields. Returns `None` if no live row has `id`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &CreateApprover,
    ) -> Result<Option<Approver>, sqlx::Error> {
        named::update(pool, TABLE, id, &input.name).await
    }

    /// Soft-delete an approver by ID. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        named::soft_delete(pool, TABLE, id).await
    }

    /// Whether a live approver with `id` exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        named::exists(pool, TABLE, id).await
    }
}
