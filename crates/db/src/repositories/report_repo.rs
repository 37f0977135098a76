//! Aggregate queries behind the spreadsheet exports.
//!
//! Soft-deleted print requests never contribute. Soft-deleted requesters
//! still contribute their requests but come back with a `NULL` name.

use schooldesk_core::dates::DateWindow;
use schooldesk_core::types::Timestamp;
use sqlx::PgPool;

use crate::models::report::{PrintRequestExportRow, RequesterCopyTotalsRow};

/// Read-only reporting queries.
pub struct ReportRepo;

impl ReportRepo {
    /// Copies per requester with `requested_at` in `[from, to]`, largest total first.
    pub async fn totals_by_requester(
        pool: &PgPool,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<RequesterCopyTotalsRow>, sqlx::Error> {
        sqlx::query_as::<_, RequesterCopyTotalsRow>(
            "SELECT pr.requester_id,
                    MAX(r.name) AS requester_name,
                    COALESCE(SUM(pr.color_copies), 0)::BIGINT AS color_copies,
                    COALESCE(SUM(pr.bw_copies), 0)::BIGINT AS bw_copies,
                    COALESCE(SUM(pr.color_copies + pr.bw_copies), 0)::BIGINT AS total_copies
             FROM print_requests pr
             LEFT JOIN requesters r ON r.id = pr.requester_id AND r.deleted_at IS NULL
             WHERE pr.deleted_at IS NULL
               AND pr.requested_at >= $1
               AND pr.requested_at <= $2
             GROUP BY pr.requester_id
             ORDER BY total_copies DESC, pr.requester_id ASC",
        )
        .bind(from)
        .bind(to)
        .fetch_all(pool)
        .await
    }

    /// Every live print request, newest first, optionally limited to `window`.
    pub async fn all_for_export(
        pool: &PgPool,
        window: Option<&DateWindow>,
    ) -> Result<Vec<PrintRequestExportRow>, sqlx::Error> {
        sqlx::query_as::<_, PrintRequestExportRow>(
            "SELECT pr.id,
                    r.name AS requester_name,
                    a.name AS approver_name,
                    pr.color_copies,
                    pr.bw_copies,
                    pr.description,
                    pr.requested_at
             FROM print_requests pr
             LEFT JOIN requesters r ON r.id = pr.requester_id AND r.deleted_at IS NULL
             LEFT JOIN approvers a ON a.id = pr.approver_id AND a.deleted_at IS NULL
             WHERE pr.deleted_at IS NULL
               AND ($1::TIMESTAMPTZ IS NULL OR pr.requested_at >= $1)
               AND ($2::TIMESTAMPTZ IS NULL OR pr.requested_at <= $2)
             ORDER BY pr.requested_at DESC, pr.id DESC",
        )
        .bind(window.map(DateWindow::starts_at))
        .bind(window.map(DateWindow::ends_at))
        .fetch_all(pool)
        .await
    }
}
