//! Aggregate rows feeding the spreadsheet exports.

use schooldesk_core::reports::CopyTotals;
use schooldesk_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Copies summed per requester over a window.
#[derive(Debug, Clone, FromRow)]
pub struct RequesterCopyTotalsRow {
    pub requester_id: DbId,
    /// `None` when the requester is soft-deleted.
    pub requester_name: Option<String>,
    pub color_copies: i64,
    pub bw_copies: i64,
    pub total_copies: i64,
}

impl From<RequesterCopyTotalsRow> for CopyTotals {
    fn from(row: RequesterCopyTotalsRow) -> Self {
        CopyTotals {
            requester_id: row.requester_id,
            requester_name: row.requester_name,
            color_copies: row.color_copies,
            bw_copies: row.bw_copies,
            total_copies: row.total_copies,
        }
    }
}

/// One line of the "all print requests" export.
#[derive(Debug, Clone, FromRow)]
pub struct PrintRequestExportRow {
    pub id: DbId,
    pub requester_name: Option<String>,
    pub approver_name: Option<String>,
    pub color_copies: i32,
    pub bw_copies: i32,
    pub description: Option<String>,
    pub requested_at: Timestamp,
}

impl PrintRequestExportRow {
    pub fn total_copies(&self) -> i64 {
        i64::from(self.color_copies) + i64::from(self.bw_copies)
    }
}
