//! Repository for the `print_requests` table.
//!
//! Reads always join the live requester/approver names so the API can embed
//! `{ id, name }` references without a second round trip.

use schooldesk_core::pagination::PageRequest;
use schooldesk_core::types::DbId;
use sqlx::PgPool;

use super::filter::{bind_values, bind_values_scalar, BindValue, WhereBuilder};
use crate::models::print_request::{
    CreatePrintRequest, PrintRequest, PrintRequestFilter, PrintRequestRow,
};

/// Column list for single-table statements.
const COLUMNS: &str = "id, requester_id, approver_id, color_copies, bw_copies, \
                       description, requested_at, created_at, updated_at";

/// Column list for joined reads (`pr` = print_requests, `r`/`a` = parties).
const JOINED_COLUMNS: &str = "pr.id, pr.requester_id, pr.approver_id, pr.color_copies, \
                              pr.bw_copies, pr.description, pr.requested_at, pr.created_at, \
                              pr.updated_at, r.name AS requester_name, a.name AS approver_name";

const JOINED_FROM: &str = "print_requests pr \
     LEFT JOIN requesters r ON r.id = pr.requester_id AND r.deleted_at IS NULL \
     LEFT JOIN approvers a ON a.id = pr.approver_id AND a.deleted_at IS NULL";

/// Provides CRUD and filtered listing for print requests.
pub struct PrintRequestRepo;

impl PrintRequestRepo {
    /// Fields a listing may be sorted by.
    pub const SORT_FIELDS: &'static [&'static str] = &[
        "id",
        "requested_at",
        "requester_id",
        "approver_id",
        "color_copies",
        "bw_copies",
        "created_at",
        "updated_at",
    ];
    pub const DEFAULT_SORT: &'static str = "requested_at";

    /// Insert a new print request, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePrintRequest,
    ) -> Result<PrintRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO print_requests
                (requester_id, approver_id, color_copies, bw_copies, description, requested_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PrintRequest>(&query)
            .bind(input.requester_id)
            .bind(input.approver_id)
            .bind(input.color_copies)
            .bind(input.bw_copies)
            .bind(&input.description)
            .bind(input.requested_at)
            .fetch_one(pool)
            .await
    }

    /// Find a print request with its party names. Excludes soft-deleted rows.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PrintRequestRow>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM {JOINED_FROM}
             WHERE pr.id = $1 AND pr.deleted_at IS NULL"
        );
        sqlx::query_as::<_, PrintRequestRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of live print requests matching `filter`.
    pub async fn list(
        pool: &PgPool,
        filter: &PrintRequestFilter,
        page: &PageRequest,
    ) -> Result<Vec<PrintRequestRow>, sqlx::Error> {
        let builder = build_print_request_filter(filter);
        let idx = builder.next_idx();
        let (where_clause, values) = builder.finish();
        let dir = page.sort.direction.as_sql();

        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM {JOINED_FROM} {where_clause} \
             ORDER BY pr.{} {dir}, pr.id {dir} \
             LIMIT ${idx} OFFSET ${}",
            page.sort.field,
            idx + 1
        );
        bind_values(sqlx::query_as::<_, PrintRequestRow>(&query), &values)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await
    }

    /// Count live print requests matching `filter`.
    pub async fn count(pool: &PgPool, filter: &PrintRequestFilter) -> Result<i64, sqlx::Error> {
        let (where_clause, values) = build_print_request_filter(filter).finish();
        let query = format!("SELECT COUNT(*)::BIGINT FROM print_requests pr {where_clause}");
        bind_values_scalar(sqlx::query_scalar::<_, i64>(&query), &values)
            .fetch_one(pool)
            .await
    }

    /// Replace a print request's fields. Returns `None` if no live row has `id`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &CreatePrintRequest,
    ) -> Result<Option<PrintRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE print_requests SET
                requester_id = $2,
                approver_id = $3,
                color_copies = $4,
                bw_copies = $5,
                description = $6,
                requested_at = $7
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PrintRequest>(&query)
            .bind(id)
            .bind(input.requester_id)
            .bind(input.approver_id)
            .bind(input.color_copies)
            .bind(input.bw_copies)
            .bind(&input.description)
            .bind(input.requested_at)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a print request by ID. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE print_requests SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Build the `WHERE` clause for print request listings. Conditions reference
/// the `pr` alias only, so the same clause serves the count query.
fn build_print_request_filter(filter: &PrintRequestFilter) -> WhereBuilder {
    let mut builder = WhereBuilder::with_static(&["pr.deleted_at IS NULL"]);

    if !filter.requester_names.is_empty() {
        builder.push(
            "pr.requester_id IN (SELECT id FROM requesters \
             WHERE deleted_at IS NULL AND name = ANY({}))",
            BindValue::TextArray(filter.requester_names.clone()),
        );
    }
    if !filter.approver_names.is_empty() {
        builder.push(
            "pr.approver_id IN (SELECT id FROM approvers \
             WHERE deleted_at IS NULL AND name = ANY({}))",
            BindValue::TextArray(filter.approver_names.clone()),
        );
    }
    if let Some(min) = filter.color_copies_min {
        builder.push("pr.color_copies >= {}", BindValue::Int(min));
    }
    if let Some(max) = filter.color_copies_max {
        builder.push("pr.color_copies <= {}", BindValue::Int(max));
    }
    if let Some(min) = filter.bw_copies_min {
        builder.push("pr.bw_copies >= {}", BindValue::Int(min));
    }
    if let Some(max) = filter.bw_copies_max {
        builder.push("pr.bw_copies <= {}", BindValue::Int(max));
    }
    if let Some(from) = filter.requested_at_from {
        builder.push("pr.requested_at >= {}", BindValue::Timestamp(from));
    }
    if let Some(to) = filter.requested_at_to {
        builder.push("pr.requested_at <= {}", BindValue::Timestamp(to));
    }

    builder
}
