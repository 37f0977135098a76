//! Queries shared by the name-only tables: `requesters`, `approvers`,
//! `authors`, `publishers`.
//!
//! `table` is always a compile-time constant supplied by the owning
//! repository, never caller input.

use schooldesk_core::pagination::PageRequest;
use schooldesk_core::types::DbId;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};

use super::filter::{bind_values, bind_values_scalar, like_pattern, BindValue, WhereBuilder};
use crate::models::named::NameFilter;

/// Column list shared by every name-only table.
const COLUMNS: &str = "id, name, created_at, updated_at";

/// Sort fields accepted by name-only listings.
pub(crate) const SORT_FIELDS: &[&str] = &["id", "name", "created_at", "updated_at"];

pub(crate) async fn create<T>(pool: &PgPool, table: &str, name: &str) -> Result<T, sqlx::Error>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let query = format!("INSERT INTO {table} (name) VALUES ($1) RETURNING {COLUMNS}");
    sqlx::query_as::<_, T>(&query)
        .bind(name)
        .fetch_one(pool)
        .await
}

pub(crate) async fn find_by_id<T>(
    pool: &PgPool,
    table: &str,
    id: DbId,
) -> Result<Option<T>, sqlx::Error>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let query = format!("SELECT {COLUMNS} FROM {table} WHERE id = $1 AND deleted_at IS NULL");
    sqlx::query_as::<_, T>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await
}

fn build_name_filter(filter: &NameFilter) -> WhereBuilder {
    let mut builder = WhereBuilder::with_static(&["deleted_at IS NULL"]);
    if let Some(search) = filter.search.as_deref() {
        builder.push("name ILIKE {}", BindValue::Text(like_pattern(search)));
    }
    builder
}

pub(crate) async fn list<T>(
    pool: &PgPool,
    table: &str,
    filter: &NameFilter,
    page: &PageRequest,
) -> Result<Vec<T>, sqlx::Error>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let builder = build_name_filter(filter);
    let idx = builder.next_idx();
    let (where_clause, values) = builder.finish();

    let query = format!(
        "SELECT {COLUMNS} FROM {table} {where_clause} \
         ORDER BY {} {}, id {} \
         LIMIT ${idx} OFFSET ${}",
        page.sort.field,
        page.sort.direction.as_sql(),
        page.sort.direction.as_sql(),
        idx + 1
    );
    bind_values(sqlx::query_as::<_, T>(&query), &values)
        .bind(page.limit)
        .bind(page.offset())
        .fetch_all(pool)
        .await
}

pub(crate) async fn count(
    pool: &PgPool,
    table: &str,
    filter: &NameFilter,
) -> Result<i64, sqlx::Error> {
    let (where_clause, values) = build_name_filter(filter).finish();
    let query = format!("SELECT COUNT(*)::BIGINT FROM {table} {where_clause}");
    bind_values_scalar(sqlx::query_scalar::<_, i64>(&query), &values)
        .fetch_one(pool)
        .await
}

pub(crate) async fn update<T>(
    pool: &PgPool,
    table: &str,
    id: DbId,
    name: &str,
) -> Result<Option<T>, sqlx::Error>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let query = format!(
        "UPDATE {table} SET name = $2 \
         WHERE id = $1 AND deleted_at IS NULL \
         RETURNING {COLUMNS}"
    );
    sqlx::query_as::<_, T>(&query)
        .bind(id)
        .bind(name)
        .fetch_optional(pool)
        .await
}

pub(crate) async fn soft_delete(pool: &PgPool, table: &str, id: DbId) -> Result<bool, sqlx::Error> {
    let query =
        format!("UPDATE {table} SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL");
    let result = sqlx::query(&query).bind(id).execute(pool).await?;
    Ok(result.rows_affected() > 0)
}

/// Whether a live (non-deleted) row with `id` exists.
pub(crate) async fn exists(pool: &PgPool, table: &str, id: DbId) -> Result<bool, sqlx::Error> {
    let query = format!(
        "SELECT EXISTS (SELECT 1 FROM {table} WHERE id = $1 AND deleted_at IS NULL)"
    );
    sqlx::query_scalar::<_, bool>(&query)
        .bind(id)
        .fetch_one(pool)
        .await
}
