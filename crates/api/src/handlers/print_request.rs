//! Handlers for the `/print-requests` resource.
//!
//! Print requests are always returned with their `requester` and `approver`
//! embedded as `{ id, name }`; a soft-deleted party embeds as `null`.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use schooldesk_core::dates::parse_datetime;
use schooldesk_core::error::CoreError;
use schooldesk_core::pagination::PaginationMeta;
use schooldesk_core::types::{DbId, Timestamp};
use schooldesk_core::validation::{
    exists_message, integer_message, string_message, FieldErrors, COPIES_FIELD,
    COPIES_REQUIRED_MESSAGE,
};
use schooldesk_db::models::print_request::{
    CreatePrintRequest, PrintRequestFilter, PrintRequestWithParties,
};
use schooldesk_db::repositories::{ApproverRepo, PrintRequestRepo, RequesterRepo};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{BodyField, IdPath, JsonBody};
use crate::middleware::auth::AuthUser;
use crate::query::{lenient, non_blank, split_list, ListParams};
use crate::response::{DataResponse, ListResponse, MessageResponse};
use crate::state::AppState;

/// Format used when echoing applied date filters.
const ECHO_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /print-requests` and `PUT /print-requests/{id}`.
///
/// Fields are read leniently so a value of the wrong JSON type is reported
/// under its own key alongside every other failing field.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PrintRequestPayload {
    pub requester_id: BodyField<DbId>,
    pub approver_id: BodyField<DbId>,
    pub color_copies: BodyField<i32>,
    pub bw_copies: BodyField<i32>,
    pub description: BodyField<String>,
    pub requested_at: BodyField<String>,
}

impl PrintRequestPayload {
    /// Unwrap each field, recording type mismatches.
    fn into_fields(self, errors: &mut FieldErrors) -> PrintRequestFields {
        PrintRequestFields {
            requester_id: self.requester_id.check(errors, "requester_id", integer_message),
            approver_id: self.approver_id.check(errors, "approver_id", integer_message),
            color_copies: self.color_copies.check(errors, "color_copies", integer_message),
            bw_copies: self.bw_copies.check(errors, "bw_copies", integer_message),
            description: self.description.check(errors, "description", string_message),
            requested_at: self.requested_at.check(errors, "requested_at", string_message),
        }
    }
}

/// The well-typed payload, before presence and range rules.
#[derive(Debug, Validate)]
struct PrintRequestFields {
    requester_id: Option<DbId>,
    approver_id: Option<DbId>,
    #[validate(range(min = 0))]
    color_copies: Option<i32>,
    #[validate(range(min = 0))]
    bw_copies: Option<i32>,
    #[validate(length(max = 500))]
    description: Option<String>,
    requested_at: Option<String>,
}

/// Filter parameters for `GET /print-requests`, on top of [`ListParams`].
///
/// Malformed numbers and dates are ignored rather than rejected.
#[derive(Debug, Default, Deserialize)]
pub struct PrintRequestListQuery {
    pub requester_names: Option<String>,
    pub approver_names: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub color_copies_min: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub color_copies_max: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub bw_copies_min: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub bw_copies_max: Option<i64>,
    pub requested_at_from: Option<String>,
    pub requested_at_to: Option<String>,
}

impl PrintRequestListQuery {
    pub fn into_filter(self) -> PrintRequestFilter {
        let parse = |value: Option<String>| {
            non_blank(value.as_deref()).and_then(|v| parse_datetime(&v))
        };
        PrintRequestFilter {
            requester_names: split_list(self.requester_names.as_deref()),
            approver_names: split_list(self.approver_names.as_deref()),
            color_copies_min: self.color_copies_min.map(copies_bound),
            color_copies_max: self.color_copies_max.map(copies_bound),
            bw_copies_min: self.bw_copies_min.map(copies_bound),
            bw_copies_max: self.bw_copies_max.map(copies_bound),
            requested_at_from: parse(self.requested_at_from),
            requested_at_to: parse(self.requested_at_to),
        }
    }
}

/// Negative bounds are clamped to zero.
fn copies_bound(value: i64) -> i32 {
    i32::try_from(value.max(0)).unwrap_or(i32::MAX)
}

/// The filters that actually took effect. Absent filters are omitted.
#[derive(Debug, Default, Serialize, PartialEq)]
pub struct FiltersApplied {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub requester_names: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub approver_names: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_copies_min: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_copies_max: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bw_copies_min: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bw_copies_max: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_at_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_at_to: Option<String>,
}

impl From<&PrintRequestFilter> for FiltersApplied {
    fn from(filter: &PrintRequestFilter) -> Self {
        let echo = |ts: Option<Timestamp>| ts.map(|t| t.format(ECHO_DATETIME_FORMAT).to_string());
        Self {
            requester_names: filter.requester_names.clone(),
            approver_names: filter.approver_names.clone(),
            color_copies_min: filter.color_copies_min,
            color_copies_max: filter.color_copies_max,
            bw_copies_min: filter.bw_copies_min,
            bw_copies_max: filter.bw_copies_max,
            requested_at_from: echo(filter.requested_at_from),
            requested_at_to: echo(filter.requested_at_to),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PrintRequestEcho {
    pub filters_applied: FiltersApplied,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Apply the field rules, then the "at least one copy" rule.
///
/// The copies rule is only checked once every field rule passes, and is
/// reported under the `copies` key.
async fn validate_payload(
    pool: &PgPool,
    payload: PrintRequestPayload,
) -> AppResult<CreatePrintRequest> {
    let mut errors = FieldErrors::new();
    let payload = payload.into_fields(&mut errors);
    errors.merge(payload.validate());

    let requester_id = errors.require("requester_id", payload.requester_id);
    if let Some(id) = requester_id {
        if !RequesterRepo::exists(pool, id).await? {
            errors.add("requester_id", exists_message("requester_id"));
        }
    }

    let approver_id = errors.require("approver_id", payload.approver_id);
    if let Some(id) = approver_id {
        if !ApproverRepo::exists(pool, id).await? {
            errors.add("approver_id", exists_message("approver_id"));
        }
    }

    let color_copies = errors.require("color_copies", payload.color_copies);
    let bw_copies = errors.require("bw_copies", payload.bw_copies);

    let requested_at = errors
        .require_text("requested_at", payload.requested_at.as_deref())
        .and_then(|raw| {
            let parsed = parse_datetime(&raw);
            if parsed.is_none() {
                errors.add("requested_at", "The requested_at field must be a valid date.");
            }
            parsed
        });

    let input = match (requester_id, approver_id, color_copies, bw_copies, requested_at) {
        (Some(requester_id), Some(approver_id), Some(color), Some(bw), Some(requested_at))
            if errors.is_empty() =>
        {
            CreatePrintRequest {
                requester_id,
                approver_id,
                color_copies: color,
                bw_copies: bw,
                description: non_blank(payload.description.as_deref()),
                requested_at,
            }
        }
        _ => return Err(errors.into()),
    };

    if input.color_copies == 0 && input.bw_copies == 0 {
        errors.add(COPIES_FIELD, COPIES_REQUIRED_MESSAGE);
        return Err(errors.into());
    }
    Ok(input)
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "PrintRequest",
        id,
    })
}

async fn load_with_parties(pool: &PgPool, id: DbId) -> AppResult<PrintRequestWithParties> {
    let row = PrintRequestRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(row.into())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/print-requests
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<ListParams>,
    Query(query): Query<PrintRequestListQuery>,
) -> AppResult<ListResponse<PrintRequestWithParties, PrintRequestEcho>> {
    let page = params.page_request(PrintRequestRepo::SORT_FIELDS, PrintRequestRepo::DEFAULT_SORT);
    let filter = query.into_filter();

    let total = PrintRequestRepo::count(&state.pool, &filter).await?;
    let rows = PrintRequestRepo::list(&state.pool, &filter, &page).await?;

    Ok(ListResponse::new(
        rows.into_iter().map(Into::into).collect(),
        "Print requests retrieved successfully.",
        PaginationMeta::new(&page, total),
        PrintRequestEcho {
            filters_applied: FiltersApplied::from(&filter),
        },
    ))
}

/// GET /api/v1/print-requests/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(id): IdPath,
) -> AppResult<DataResponse<PrintRequestWithParties>> {
    let request = load_with_parties(&state.pool, id).await?;
    Ok(DataResponse::new(request, "Print request retrieved successfully."))
}

/// POST /api/v1/print-requests
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(payload): JsonBody<PrintRequestPayload>,
) -> AppResult<(StatusCode, Json<DataResponse<PrintRequestWithParties>>)> {
    let input = validate_payload(&state.pool, payload).await?;
    let created = PrintRequestRepo::create(&state.pool, &input).await?;

    tracing::info!(
        print_request_id = created.id,
        requester_id = created.requester_id,
        color_copies = created.color_copies,
        bw_copies = created.bw_copies,
        user_id = auth.user_id,
        "Print request created"
    );

    let request = load_with_parties(&state.pool, created.id).await?;
    Ok(DataResponse::new(request, "Print request created successfully.").created())
}

/// PUT /api/v1/print-requests/{id}
///
/// Full replace; the same rules as create apply.
pub async fn update(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(id): IdPath,
    JsonBody(payload): JsonBody<PrintRequestPayload>,
) -> AppResult<DataResponse<PrintRequestWithParties>> {
    if PrintRequestRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(not_found(id));
    }
    let input = validate_payload(&state.pool, payload).await?;
    PrintRequestRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    let request = load_with_parties(&state.pool, id).await?;
    Ok(DataResponse::new(request, "Print request updated successfully."))
}

/// DELETE /api/v1/print-requests/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> AppResult<MessageResponse> {
    if !PrintRequestRepo::soft_delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(print_request_id = id, user_id = auth.user_id, "Print request deleted");
    Ok(MessageResponse::new("Print request deleted successfully."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_copy_bounds_are_clamped() {
        let query = PrintRequestListQuery {
            color_copies_min: Some(-5),
            bw_copies_max: Some(12),
            ..Default::default()
        };
        let filter = query.into_filter();
        assert_eq!(filter.color_copies_min, Some(0));
        assert_eq!(filter.bw_copies_max, Some(12));
        assert_eq!(filter.color_copies_max, None);
    }

    #[test]
    fn unparseable_dates_are_dropped() {
        let query = PrintRequestListQuery {
            requested_at_from: Some("yesterday-ish".into()),
            requested_at_to: Some("2025-08-31 23:59:59".into()),
            ..Default::default()
        };
        let filter = query.into_filter();
        assert!(filter.requested_at_from.is_none());
        assert!(filter.requested_at_to.is_some());
    }

    #[test]
    fn filters_applied_only_lists_effective_filters() {
        let query = PrintRequestListQuery {
            requester_names: Some(" Elif Bal, ,".into()),
            requested_at_from: Some("2025-08-01".into()),
            ..Default::default()
        };
        let filter = query.into_filter();
        let json = serde_json::to_value(FiltersApplied::from(&filter)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "requester_names": ["Elif Bal"],
                "requested_at_from": "2025-08-01 00:00:00",
            })
        );
    }

    #[test]
    fn huge_bounds_saturate() {
        assert_eq!(copies_bound(i64::MAX), i32::MAX);
    }
}
