//! Print request model, DTO, and listing filter.

use schooldesk_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::named::PartyRef;

/// A row from the `print_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PrintRequest {
    pub id: DbId,
    pub requester_id: DbId,
    pub approver_id: DbId,
    pub color_copies: i32,
    pub bw_copies: i32,
    pub description: Option<String>,
    pub requested_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Validated input for creating or replacing a print request.
#[derive(Debug, Clone)]
pub struct CreatePrintRequest {
    pub requester_id: DbId,
    pub approver_id: DbId,
    pub color_copies: i32,
    pub bw_copies: i32,
    pub description: Option<String>,
    pub requested_at: Timestamp,
}

/// A print request joined with the names of its live parties.
///
/// The names are `None` when the requester or approver is soft-deleted.
#[derive(Debug, Clone, FromRow)]
pub struct PrintRequestRow {
    #[sqlx(flatten)]
    pub request: PrintRequest,
    pub requester_name: Option<String>,
    pub approver_name: Option<String>,
}

/// API shape: the request's own columns plus embedded `requester`/`approver`.
#[derive(Debug, Clone, Serialize)]
pub struct PrintRequestWithParties {
    #[serde(flatten)]
    pub request: PrintRequest,
    pub requester: Option<PartyRef>,
    pub approver: Option<PartyRef>,
}

impl From<PrintRequestRow> for PrintRequestWithParties {
    fn from(row: PrintRequestRow) -> Self {
        let requester = PartyRef::from_join(row.request.requester_id, row.requester_name);
        let approver = PartyRef::from_join(row.request.approver_id, row.approver_name);
        Self {
            request: row.request,
            requester,
            approver,
        }
    }
}

/// Listing filter. Every field is optional and only narrows the result.
#[derive(Debug, Clone, Default)]
pub struct PrintRequestFilter {
    /// Exact names of live requesters; a request matches any of them.
    pub requester_names: Vec<String>,
    /// Exact names of live approvers; a request matches any of them.
    pub approver_names: Vec<String>,
    pub color_copies_min: Option<i32>,
    pub color_copies_max: Option<i32>,
    pub bw_copies_min: Option<i32>,
    pub bw_copies_max: Option<i32>,
    pub requested_at_from: Option<Timestamp>,
    pub requested_at_to: Option<Timestamp>,
}
