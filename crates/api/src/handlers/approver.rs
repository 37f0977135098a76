//! Handlers for the `/approvers` resource.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use schooldesk_core::error::CoreError;
use schooldesk_core::pagination::PaginationMeta;
use schooldesk_core::types::DbId;
use schooldesk_db::models::approver::{Approver, CreateApprover};
use schooldesk_db::models::named::NameFilter;
use schooldesk_db::repositories::ApproverRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{IdPath, JsonBody};
use crate::handlers::named::{NamePayload, SearchEcho};
use crate::middleware::auth::AuthUser;
use crate::query::{ListParams, SearchParams};
use crate::response::{DataResponse, ListResponse, MessageResponse};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Approver",
        id,
    })
}

/// GET /api/v1/approvers
///
/// Paginated listing with an optional case-insensitive `search` on name.
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<ListParams>,
    Query(search): Query<SearchParams>,
) -> AppResult<ListResponse<Approver, SearchEcho>> {
    let page = params.page_request(ApproverRepo::SORT_FIELDS, ApproverRepo::DEFAULT_SORT);
    let filter = NameFilter {
        search: search.term(),
    };

    let total = ApproverRepo::count(&state.pool, &filter).await?;
    let approvers = ApproverRepo::list(&state.pool, &filter, &page).await?;

    Ok(ListResponse::new(
        approvers,
        "Approvers retrieved successfully.",
        PaginationMeta::new(&page, total),
        SearchEcho::from(&filter),
    ))
}

/// GET /api/v1/approvers/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(id): IdPath,
) -> AppResult<DataResponse<Approver>> {
    let approver = ApproverRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(DataResponse::new(approver, "Approver retrieved successfully."))
}

/// POST /api/v1/approvers
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(payload): JsonBody<NamePayload>,
) -> AppResult<(StatusCode, Json<DataResponse<Approver>>)> {
    let name = payload.into_name()?;
    let approver = ApproverRepo::create(&state.pool, &CreateApprover { name }).await?;

    tracing::info!(
        approver_id = approver.id,
        user_id = auth.user_id,
        "Approver created"
    );
    Ok(DataResponse::new(approver, "Approver created successfully.").created())
}

/// PUT /api/v1/approvers/{id}
pub async fn update(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(id): IdPath,
    JsonBody(payload): JsonBody<NamePayload>,
) -> AppResult<DataResponse<Approver>> {
    if !ApproverRepo::exists(&state.pool, id).await? {
        return Err(not_found(id));
    }
    let name = payload.into_name()?;
    let approver = ApproverRepo::update(&state.pool, id, &CreateApprover { name })
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(DataResponse::new(approver, "Approver updated successfully."))
}

/// DELETE /api/v1/approvers/{id}
///
/// Soft delete. Print requests approved by it keep their `approver_id`.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> AppResult<MessageResponse> {
    if !ApproverRepo::soft_delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(approver_id = id, user_id = auth.user_id, "Approver deleted");
    Ok(MessageResponse::new("Approver deleted successfully."))
}
