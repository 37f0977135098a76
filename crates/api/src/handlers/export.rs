//! Handlers for the spreadsheet exports under `/print-requests/export`.

use axum::extract::{Query, State};
use rust_xlsxwriter::XlsxError;
use schooldesk_core::dates::{read_window, DateWindow};
use schooldesk_core::reports::{compare_periods, CopyTotals};
use schooldesk_core::validation::FieldErrors;
use schooldesk_db::repositories::ReportRepo;
use serde::Deserialize;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::export::{all_requests, by_requester, comparison, XlsxFile};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// `?start_date=&end_date=` (`YYYY-MM-DD`).
#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Two `YYYY-MM-DD` windows to compare.
#[derive(Debug, Default, Deserialize)]
pub struct ComparisonQuery {
    pub first_start_date: Option<String>,
    pub first_end_date: Option<String>,
    pub second_start_date: Option<String>,
    pub second_end_date: Option<String>,
}

fn spreadsheet_error(err: XlsxError) -> AppError {
    AppError::InternalError(format!("Spreadsheet generation error: {err}"))
}

async fn totals(pool: &PgPool, window: &DateWindow) -> AppResult<Vec<CopyTotals>> {
    let rows = ReportRepo::totals_by_requester(pool, window.starts_at(), window.ends_at()).await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

/// GET /api/v1/print-requests/export/by-requester
pub async fn export_by_requester(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<RangeQuery>,
) -> AppResult<XlsxFile> {
    let mut errors = FieldErrors::new();
    let window = read_window(
        &mut errors,
        "start_date",
        query.start_date.as_deref(),
        "end_date",
        query.end_date.as_deref(),
        true,
    );
    let window = match window {
        Some(window) if errors.is_empty() => window,
        _ => return Err(errors.into()),
    };

    let rows = totals(&state.pool, &window).await?;
    let bytes = by_requester::build(&window, &rows).map_err(spreadsheet_error)?;

    tracing::info!(
        user_id = auth.user_id,
        requesters = rows.len(),
        window = %window.label(),
        "Exported print report by requester"
    );
    Ok(XlsxFile {
        filename: by_requester::filename(&window),
        bytes,
    })
}

/// GET /api/v1/print-requests/export/comparison
pub async fn export_comparison(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ComparisonQuery>,
) -> AppResult<XlsxFile> {
    let mut errors = FieldErrors::new();
    let first = read_window(
        &mut errors,
        "first_start_date",
        query.first_start_date.as_deref(),
        "first_end_date",
        query.first_end_date.as_deref(),
        true,
    );
    let second = read_window(
        &mut errors,
        "second_start_date",
        query.second_start_date.as_deref(),
        "second_end_date",
        query.second_end_date.as_deref(),
        true,
    );
    let (first, second) = match (first, second) {
        (Some(first), Some(second)) if errors.is_empty() => (first, second),
        _ => return Err(errors.into()),
    };

    let first_totals = totals(&state.pool, &first).await?;
    let second_totals = totals(&state.pool, &second).await?;
    let rows = compare_periods(&first_totals, &second_totals);
    let bytes = comparison::build(&first, &second, &rows).map_err(spreadsheet_error)?;

    tracing::info!(
        user_id = auth.user_id,
        requesters = rows.len(),
        first = %first.label(),
        second = %second.label(),
        "Exported print comparison report"
    );
    Ok(XlsxFile {
        filename: comparison::filename(&first, &second),
        bytes,
    })
}

/// GET /api/v1/print-requests/export/all
///
/// The date window is optional and only applied when both bounds are given.
pub async fn export_all(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<RangeQuery>,
) -> AppResult<XlsxFile> {
    let mut errors = FieldErrors::new();
    let window = read_window(
        &mut errors,
        "start_date",
        query.start_date.as_deref(),
        "end_date",
        query.end_date.as_deref(),
        false,
    );
    if !errors.is_empty() {
        return Err(errors.into());
    }

    let rows = ReportRepo::all_for_export(&state.pool, window.as_ref()).await?;
    let bytes = all_requests::build(window.as_ref(), &rows).map_err(spreadsheet_error)?;

    tracing::info!(
        user_id = auth.user_id,
        requests = rows.len(),
        "Exported all print requests"
    );
    Ok(XlsxFile {
        filename: all_requests::filename(window.as_ref()),
        bytes,
    })
}
