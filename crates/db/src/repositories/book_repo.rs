//! Repository for the `books` table.

use schooldesk_core::pagination::PageRequest;
use schooldesk_core::types::DbId;
use sqlx::PgPool;

use super::filter::{bind_values, bind_values_scalar, like_pattern, BindValue, WhereBuilder};
use crate::models::book::{Book, BookFilter, BookRow, CreateBook};

/// Column list shared across single-table queries.
const COLUMNS: &str = "id, name, type, language, page_count, is_donation, barcode, \
                       shelf_code, fixture_no, level, author_id, publisher_id, \
                       created_at, updated_at";

/// Column list for joined reads (`b` = books, `au`/`pu` = author/publisher).
const JOINED_COLUMNS: &str = "b.id, b.name, b.type, b.language, b.page_count, b.is_donation, \
                              b.barcode, b.shelf_code, b.fixture_no, b.level, b.author_id, \
                              b.publisher_id, b.created_at, b.updated_at, \
                              au.name AS author_name, pu.name AS publisher_name";

const JOINED_FROM: &str = "books b \
     LEFT JOIN authors au ON au.id = b.author_id AND au.deleted_at IS NULL \
     LEFT JOIN publishers pu ON pu.id = b.publisher_id AND pu.deleted_at IS NULL";

/// Provides CRUD operations for library books.
pub struct BookRepo;

impl BookRepo {
    pub const SORT_FIELDS: &'static [&'static str] = &[
        "id",
        "name",
        "author_id",
        "publisher_id",
        "created_at",
        "updated_at",
    ];
    pub const DEFAULT_SORT: &'static str = "created_at";

    /// Insert a new book, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateBook) -> Result<Book, sqlx::Error> {
        let query = format!(
            "INSERT INTO books
                (name, type, language, page_count, is_donation, barcode, shelf_code,
                 fixture_no, level, author_id, publisher_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(&input.name)
            .bind(&input.book_type)
            .bind(&input.language)
            .bind(input.page_count)
            .bind(input.is_donation)
            .bind(&input.barcode)
            .bind(&input.shelf_code)
            .bind(&input.fixture_no)
            .bind(input.level.as_str())
            .bind(input.author_id)
            .bind(input.publisher_id)
            .fetch_one(pool)
            .await
    }

    /// Find a book with its author/publisher names. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<BookRow>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM {JOINED_FROM}
             WHERE b.id = $1 AND b.deleted_at IS NULL"
        );
        sqlx::query_as::<_, BookRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of live books matching `filter`.
    pub async fn list(
        pool: &PgPool,
        filter: &BookFilter,
        page: &PageRequest,
    ) -> Result<Vec<BookRow>, sqlx::Error> {
        let builder = build_book_filter(filter);
        let idx = builder.next_idx();
        let (where_clause, values) = builder.finish();
        let dir = page.sort.direction.as_sql();

        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM {JOINED_FROM} {where_clause} \
             ORDER BY b.{} {dir}, b.id {dir} \
             LIMIT ${idx} OFFSET ${}",
            page.sort.field,
            idx + 1
        );
        bind_values(sqlx::query_as::<_, BookRow>(&query), &values)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await
    }

    /// Count live books matching `filter`.
    pub async fn count(pool: &PgPool, filter: &BookFilter) -> Result<i64, sqlx::Error> {
        let (where_clause, values) = build_book_filter(filter).finish();
        let query = format!("SELECT COUNT(*)::BIGINT FROM books b {where_clause}");
        bind_values_scalar(sqlx::query_scalar::<_, i64>(&query), &values)
            .fetch_one(pool)
            .await
    }

    /// Replace a book's fields. Returns `None` if no live row has `id`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &CreateBook,
    ) -> Result<Option<Book>, sqlx::Error> {
        let query = format!(
            "UPDATE books SET
                name = $2,
                type = $3,
                language = $4,
                page_count = $5,
                is_donation = $6,
                barcode = $7,
                shelf_code = $8,
                fixture_no = $9,
                level = $10,
                author_id = $11,
                publisher_id = $12
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.book_type)
            .bind(&input.language)
            .bind(input.page_count)
            .bind(input.is_donation)
            .bind(&input.barcode)
            .bind(&input.shelf_code)
            .bind(&input.fixture_no)
            .bind(input.level.as_str())
            .bind(input.author_id)
            .bind(input.publisher_id)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a book by ID. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE books SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether a live book other than `exclude_id` already carries `fixture_no`.
    pub async fn fixture_no_taken(
        pool: &PgPool,
        fixture_no: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                SELECT 1 FROM books
                WHERE fixture_no = $1
                  AND deleted_at IS NULL
                  AND ($2::BIGINT IS NULL OR id <> $2)
            )",
        )
        .bind(fixture_no)
        .bind(exclude_id)
        .fetch_one(pool)
        .await
    }
}

fn build_book_filter(filter: &BookFilter) -> WhereBuilder {
    let mut builder = WhereBuilder::with_static(&["b.deleted_at IS NULL"]);

    if let Some(name) = filter.name.as_deref() {
        builder.push("b.name ILIKE {}", BindValue::Text(like_pattern(name)));
    }
    if let Some(author_id) = filter.author_id {
        builder.push("b.author_id = {}", BindValue::BigInt(author_id));
    }
    if let Some(publisher_id) = filter.publisher_id {
        builder.push("b.publisher_id = {}", BindValue::BigInt(publisher_id));
    }
    if let Some(level) = filter.level {
        builder.push("b.level = {}", BindValue::Text(level.as_str().to_string()));
    }
    if let Some(is_donation) = filter.is_donation {
        builder.push("b.is_donation = {}", BindValue::Bool(is_donation));
    }

    builder
}
